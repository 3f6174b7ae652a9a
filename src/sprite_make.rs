use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::asset_header::{self, AssetHeader};
use crate::error::{Result, SpriteError};
use crate::rgb565;
use crate::shared_types::{
	PixelFormat,
	RgbaImage,
	SpriteDescriptor,
	SpritePixels,
};

/// Struct the alpha array is declared with. Defined by the engine, not here.
pub const SPRITE_PIXEL_TYPE: &str = "SpritePixel";
const SPRITE_PIXEL_INCLUDE: &str = "framebuffer.h";
const INDENT: &str = "    ";


/// Renders the C header declaring `descriptor` and its pixel array.
pub fn make_header(source_label: &str, descriptor: &SpriteDescriptor, pixels: &SpritePixels) -> Result<String> {
	let mut output = String::new();
	let guard: String = descriptor.guard_macro();
	let name: &str = &descriptor.name;

	writeln!(output, "// Auto-generated from {}", source_label)?;
	writeln!(output, "// Sprite dimensions: {}x{}", descriptor.width, descriptor.height)?;
	if pixels.format() == PixelFormat::Rgb565Alpha8 {
		writeln!(output, "// Format: RGB565 + Alpha8 (3 bytes per pixel)")?;
	}
	writeln!(output)?;

	writeln!(output, "#ifndef {}", guard)?;
	writeln!(output, "#define {}", guard)?;
	writeln!(output)?;

	writeln!(output, "#include <stdint.h>")?;
	if pixels.format() == PixelFormat::Rgb565Alpha8 {
		writeln!(output, "#include \"{}\"  // For {} definition", SPRITE_PIXEL_INCLUDE, SPRITE_PIXEL_TYPE)?;
	}
	writeln!(output)?;

	writeln!(output, "const uint16_t {}_width = {};", name, descriptor.width)?;
	writeln!(output, "const uint16_t {}_height = {};", name, descriptor.height)?;
	writeln!(output)?;

	let per_line: usize = pixels.format().entries_per_line();

	match pixels {
		SpritePixels::Rgb565(values) => {
			writeln!(output, "const uint16_t {}_data[{}] = {{", name, values.len())?;

			for line in values.chunks(per_line) {
				let entries: Vec<String> = line.iter()
					.map(|value| format!("0x{:04X}", value))
					.collect();
				writeln!(output, "{}{},", INDENT, entries.join(", "))?;
			}
		},

		SpritePixels::Rgb565Alpha8(values) => {
			writeln!(output, "const {} {}_data[{}] = {{", SPRITE_PIXEL_TYPE, name, values.len())?;

			for line in values.chunks(per_line) {
				let entries: Vec<String> = line.iter()
					.map(|pixel| format!("{{0x{:04X}, {:3}}}", pixel.color, pixel.alpha))
					.collect();
				writeln!(output, "{}{},", INDENT, entries.join(", "))?;
			}
		},
	}

	writeln!(output, "}};")?;
	writeln!(output)?;
	writeln!(output, "#endif // {}", guard)?;

	return Ok(output);
}


/// Header plus packed pixels, the layout the converters read back.
pub fn make_asset(image: &RgbaImage, format: PixelFormat) -> Result<Vec<u8>> {
	let mut data: Vec<u8> = asset_header::get_bytes(AssetHeader {
		width: image.width,
		height: image.height,
	}).to_vec();

	let pixels: Vec<u8> = rgb565::encode_pixels(image, format)
		.map_err(SpriteError::PixelStream)?;
	data.extend_from_slice(&pixels);

	return Ok(data);
}


pub fn write_file(target_path: &Path, contents: &[u8]) -> Result<()> {
	fs::write(target_path, contents).map_err(|error| SpriteError::io(target_path, error))?;
	debug!("Wrote {} bytes to {}", contents.len(), target_path.display());
	Ok(())
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::shared_types::AlphaPixel;

	fn descriptor(name: &str, width: u16, height: u16) -> SpriteDescriptor {
		SpriteDescriptor {
			name: name.to_string(),
			width: width,
			height: height,
		}
	}

	#[test]
	fn rgb565_header_layout() {
		let pixels = SpritePixels::Rgb565(vec![0x1234]);
		let text = make_header("in.sprite", &descriptor("Foo", 2, 1), &pixels).unwrap();

		let expected = "\
// Auto-generated from in.sprite
// Sprite dimensions: 2x1

#ifndef SPRITE_FOO_H
#define SPRITE_FOO_H

#include <stdint.h>

const uint16_t Foo_width = 2;
const uint16_t Foo_height = 1;

const uint16_t Foo_data[1] = {
    0x1234,
};

#endif // SPRITE_FOO_H
";
		assert_eq!(text, expected);
	}

	#[test]
	fn rgb565_wraps_after_eight_entries() {
		let pixels = SpritePixels::Rgb565((0..9).collect());
		let text = make_header("in.sprite", &descriptor("s", 3, 3), &pixels).unwrap();

		assert!(text.contains("    0x0000, 0x0001, 0x0002, 0x0003, 0x0004, 0x0005, 0x0006, 0x0007,\n    0x0008,\n};"));
	}

	#[test]
	fn alpha_header_layout() {
		let pixels = SpritePixels::Rgb565Alpha8(vec![
			AlphaPixel { color: 0x1234, alpha: 128 },
			AlphaPixel { color: 0xabcd, alpha: 0 },
			AlphaPixel { color: 0x0001, alpha: 7 },
			AlphaPixel { color: 0xFFFF, alpha: 255 },
			AlphaPixel { color: 0xF81F, alpha: 45 },
		]);
		let text = make_header("in.sprite", &descriptor("hero", 5, 1), &pixels).unwrap();

		assert!(text.contains("// Format: RGB565 + Alpha8 (3 bytes per pixel)\n"));
		assert!(text.contains("#include \"framebuffer.h\"  // For SpritePixel definition\n"));
		assert!(text.contains("const SpritePixel hero_data[5] = {\n"));
		assert!(text.contains("    {0x1234, 128}, {0xABCD,   0}, {0x0001,   7}, {0xFFFF, 255},\n    {0xF81F,  45},\n};"));
	}

	#[test]
	fn empty_array_still_closes() {
		let text = make_header("in.sprite", &descriptor("e", 0, 0), &SpritePixels::Rgb565(vec![])).unwrap();
		assert!(text.contains("const uint16_t e_data[0] = {\n};\n"));
	}

	#[test]
	fn asset_starts_with_dimensions() {
		let image = RgbaImage {
			width: 1,
			height: 1,
			source_channels: 4,
			pixels: vec![0xFF, 0xFF, 0xFF, 0xFF],
		};

		assert_eq!(make_asset(&image, PixelFormat::Rgb565).unwrap(), vec![1, 0, 1, 0, 0xFF, 0xFF]);
		assert_eq!(make_asset(&image, PixelFormat::Rgb565Alpha8).unwrap(), vec![1, 0, 1, 0, 0xFF, 0xFF, 0xFF]);
	}
}
