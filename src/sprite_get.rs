use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use bmp_rust::bmp::{BMP, BITMAPFILEHEADER, DIBHEADER};
use tracing::debug;

use crate::error::{Result, SpriteError};
use crate::shared_types::RgbaImage;

const BITMAPFILEHEADER_SIZE: usize = 14;
const BITMAPCOREHEADER_SIZE: usize = 12;
const COMPRESSION_MAX: u32 = 6;


/// Reads a sprite asset in full.
pub fn get_asset(source_file: &Path) -> Result<Vec<u8>> {
	let data: Vec<u8> = fs::read(source_file).map_err(|error| SpriteError::io(source_file, error))?;
	debug!("Read {} bytes from {}", data.len(), source_file.display());
	Ok(data)
}


/// Loads a PNG or BMP, picked by extension, as RGBA8.
pub fn get_image(source_file: &Path) -> Result<RgbaImage> {
	let extension: String = source_file
		.extension()
		.and_then(|extension| extension.to_str())
		.map(|extension| extension.to_lowercase())
		.unwrap_or_default();

	match extension.as_str() {
		"png" => get_png(source_file),
		"bmp" => get_bmp(source_file),
		_ => Err(SpriteError::UnsupportedImage(format!("'{}' (use .png or .bmp)", source_file.display()))),
	}
}


fn checked_dimensions(width: u32, height: u32) -> Result<(u16, u16)> {
	if std::cmp::max(width, height) > u16::MAX as u32 {
		return Err(SpriteError::DimensionsTooLarge {
			width: width,
			height: height,
		});
	}

	return Ok((width as u16, height as u16));
}


pub fn get_png(source_file: &Path) -> Result<RgbaImage> {
	let file: File = File::open(source_file).map_err(|error| SpriteError::io(source_file, error))?;
	let decode_error = |error: png::DecodingError| SpriteError::ImageDecode {
		path: source_file.to_path_buf(),
		source: error,
	};

	// Palettes, low bit depths and tRNS expand to 8-bit channels
	let mut decoder = png::Decoder::new(BufReader::new(file));
	decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
	let mut reader = decoder.read_info().map_err(decode_error)?;

	let mut buffer: Vec<u8> = vec![0; reader.output_buffer_size()];
	let frame = reader.next_frame(&mut buffer).map_err(decode_error)?;
	let source_bytes: &[u8] = &buffer[..frame.buffer_size()];

	let (width, height) = checked_dimensions(frame.width, frame.height)?;
	let pixel_count: usize = width as usize * height as usize;
	let mut pixels: Vec<u8> = Vec::with_capacity(pixel_count * 4);

	let source_channels: u8 = match frame.color_type {
		png::ColorType::Grayscale => {
			for &gray in source_bytes.iter().take(pixel_count) {
				pixels.extend_from_slice(&[gray, gray, gray, 0xFF]);
			}
			1
		},

		png::ColorType::GrayscaleAlpha => {
			for pixel in source_bytes.chunks_exact(2).take(pixel_count) {
				pixels.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
			}
			2
		},

		png::ColorType::Rgb => {
			for pixel in source_bytes.chunks_exact(3).take(pixel_count) {
				pixels.extend_from_slice(&[pixel[0], pixel[1], pixel[2], 0xFF]);
			}
			3
		},

		png::ColorType::Rgba => {
			pixels.extend_from_slice(&source_bytes[..pixel_count * 4]);
			4
		},

		// EXPAND turns indexed images into RGB(A)
		png::ColorType::Indexed => {
			return Err(SpriteError::UnsupportedImage(format!("'{}' is indexed and could not be expanded", source_file.display())));
		},
	};

	return Ok(RgbaImage {
		width: width,
		height: height,
		source_channels: source_channels,
		pixels: pixels,
	});
}


pub fn get_bmp(source_file: &Path) -> Result<RgbaImage> {
	// BMP::new_from_file panics on read failure, so read the bytes ourselves
	let bytes: Vec<u8> = fs::read(source_file).map_err(|error| SpriteError::io(source_file, error))?;
	let bmp_error = |reason: &str| SpriteError::BmpDecode {
		path: source_file.to_path_buf(),
		reason: reason.to_string(),
	};

	if bytes.len() < BITMAPFILEHEADER_SIZE + BITMAPCOREHEADER_SIZE || &bytes[0..2] != b"BM" {
		return Err(bmp_error("not a bitmap file"));
	}

	// bmp-rust indexes the whole declared DIB header and unwraps the compression id
	let dib_size: usize = u32::from_le_bytes([
		bytes[0x0E], bytes[0x0F], bytes[0x10], bytes[0x11]
	]) as usize;

	if dib_size < BITMAPCOREHEADER_SIZE || bytes.len() < BITMAPFILEHEADER_SIZE + dib_size {
		return Err(bmp_error(&format!("DIB header declares {} bytes, file is too short", dib_size)));
	}

	if dib_size > BITMAPCOREHEADER_SIZE {
		if dib_size < 20 {
			return Err(bmp_error(&format!("unsupported DIB header size {}", dib_size)));
		}

		let compression: u32 = u32::from_le_bytes([
			bytes[0x1E], bytes[0x1F], bytes[0x20], bytes[0x21]
		]);

		if compression > COMPRESSION_MAX {
			return Err(bmp_error(&format!("unknown compression id {}", compression)));
		}
	}

	let mut bmp: BMP = BMP::new(1i32, 1u32, Some([0u8, 0u8, 0u8, 0u8]));
	bmp.contents = bytes;

	let file_header: BITMAPFILEHEADER = BMP::get_header(&bmp);
	let dib_header: DIBHEADER = match BMP::get_dib_header(&bmp) {
		Ok(header) => header,
		_ => return Err(bmp_error("could not read DIB header")),
	};

	let bitcount: usize = dib_header.bitcount as usize;
	let bytes_per_pixel: usize = match bitcount {
		24 => 3,
		32 => 4,
		_ => return Err(bmp_error(&format!("unsupported color depth ({} bpp), use 24 or 32", bitcount))),
	};

	match dib_header.compression.as_deref() {
		None | Some("BI_RGB") => (),
		Some("BI_BITFIELDS") if bitcount == 32 => (),
		Some(other) => return Err(bmp_error(&format!("unsupported compression {}", other))),
	}

	let (width, height) = checked_dimensions(dib_header.width, dib_header.height.unsigned_abs())?;
	let top_down: bool = dib_header.height < 0;

	let u_width: usize = width as usize;
	let u_height: usize = height as usize;
	let row_size: usize = ((bitcount * u_width + 31) / 32) * 4;
	let start: usize = file_header.bfOffBits as usize;

	if start + row_size * u_height > bmp.contents.len() {
		return Err(bmp_error("pixel array is truncated"));
	}

	let mut pixels: Vec<u8> = Vec::with_capacity(u_width * u_height * 4);

	for y in 0..u_height {
		let source_row: usize = if top_down { y } else { u_height - 1 - y };
		let row_start: usize = start + source_row * row_size;

		for x in 0..u_width {
			let offset: usize = row_start + x * bytes_per_pixel;
			let alpha: u8 = if bytes_per_pixel == 4 { bmp.contents[offset + 3] } else { 0xFF };

			// BGR(A) on disk
			pixels.push(bmp.contents[offset + 2]);
			pixels.push(bmp.contents[offset + 1]);
			pixels.push(bmp.contents[offset]);
			pixels.push(alpha);
		}
	}

	// 32 bpp files that never set alpha are opaque
	let mut source_channels: u8 = bytes_per_pixel as u8;
	if bytes_per_pixel == 4 && pixels.chunks_exact(4).all(|pixel| pixel[3] == 0) {
		for pixel in pixels.chunks_exact_mut(4) {
			pixel[3] = 0xFF;
		}
		source_channels = 3;
	}

	return Ok(RgbaImage {
		width: width,
		height: height,
		source_channels: source_channels,
		pixels: pixels,
	});
}


#[cfg(test)]
mod tests {
	use super::*;
	use std::io::BufWriter;
	use tempfile::tempdir;

	fn write_png(path: &Path, width: u32, height: u32, color: png::ColorType, data: &[u8]) {
		let file = File::create(path).unwrap();
		let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
		encoder.set_color(color);
		encoder.set_depth(png::BitDepth::Eight);
		let mut writer = encoder.write_header().unwrap();
		writer.write_image_data(data).unwrap();
	}

	fn bmp(width: u32, height: i32, bitcount: u16, rows: &[&[u8]]) -> Vec<u8> {
		let row_size: usize = ((bitcount as usize * width as usize + 31) / 32) * 4;
		let pixel_bytes: usize = row_size * rows.len();
		let offset: u32 = 14 + 40;
		let mut data: Vec<u8> = Vec::new();

		data.extend_from_slice(b"BM");
		data.extend_from_slice(&(offset + pixel_bytes as u32).to_le_bytes());
		data.extend_from_slice(&[0, 0, 0, 0]);
		data.extend_from_slice(&offset.to_le_bytes());

		// BITMAPINFOHEADER
		data.extend_from_slice(&40u32.to_le_bytes());
		data.extend_from_slice(&(width as i32).to_le_bytes());
		data.extend_from_slice(&height.to_le_bytes());
		data.extend_from_slice(&1u16.to_le_bytes());
		data.extend_from_slice(&bitcount.to_le_bytes());
		data.extend_from_slice(&0u32.to_le_bytes());
		data.extend_from_slice(&(pixel_bytes as u32).to_le_bytes());
		data.extend_from_slice(&2835i32.to_le_bytes());
		data.extend_from_slice(&2835i32.to_le_bytes());
		data.extend_from_slice(&0u32.to_le_bytes());
		data.extend_from_slice(&0u32.to_le_bytes());

		for row in rows {
			let mut padded: Vec<u8> = row.to_vec();
			padded.resize(row_size, 0);
			data.extend_from_slice(&padded);
		}

		data
	}

	#[test]
	fn rgb_png_is_promoted_to_rgba() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("rgb.png");
		write_png(&path, 2, 1, png::ColorType::Rgb, &[255, 0, 0, 0, 255, 0]);

		let image = get_image(&path).unwrap();
		assert_eq!((image.width, image.height, image.source_channels), (2, 1, 3));
		assert_eq!(image.pixels, vec![255, 0, 0, 255, 0, 255, 0, 255]);
	}

	#[test]
	fn rgba_png_keeps_alpha() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("rgba.png");
		write_png(&path, 1, 1, png::ColorType::Rgba, &[1, 2, 3, 4]);

		let image = get_png(&path).unwrap();
		assert_eq!(image.source_channels, 4);
		assert_eq!(image.pixel(0), [1, 2, 3, 4]);
	}

	#[test]
	fn gray_alpha_png_is_expanded() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("ga.png");
		write_png(&path, 1, 1, png::ColorType::GrayscaleAlpha, &[90, 7]);

		assert_eq!(get_png(&path).unwrap().pixel(0), [90, 90, 90, 7]);
	}

	#[test]
	fn bottom_up_bmp_is_flipped() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("two.bmp");
		// Last row on disk is the top of the image
		let bytes = bmp(1, 2, 24, &[&[0x00, 0x00, 0xFF], &[0xFF, 0x00, 0x00]]);
		fs::write(&path, bytes).unwrap();

		let image = get_image(&path).unwrap();
		assert_eq!((image.width, image.height), (1, 2));
		assert_eq!(image.pixel(0), [0x00, 0x00, 0xFF, 0xFF]);
		assert_eq!(image.pixel(1), [0xFF, 0x00, 0x00, 0xFF]);
	}

	#[test]
	fn unknown_extension_is_rejected() {
		let result = get_image(Path::new("sprite.gif"));
		assert!(matches!(result, Err(SpriteError::UnsupportedImage(_))));
	}

	#[test]
	fn missing_asset_reports_path() {
		let error = get_asset(Path::new("/nonexistent/ghost.sprite")).unwrap_err();
		assert!(error.to_string().contains("ghost.sprite"));
	}

	#[test]
	fn top_down_32bpp_bmp_keeps_row_order_and_alpha() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("top.bmp");
		// Negative height: first row on disk is the top
		let bytes = bmp(1, -2, 32, &[&[0x00, 0x00, 0xFF, 128], &[0xFF, 0x00, 0x00, 64]]);
		fs::write(&path, bytes).unwrap();

		let image = get_image(&path).unwrap();
		assert_eq!((image.width, image.height, image.source_channels), (1, 2, 4));
		assert_eq!(image.pixel(0), [0xFF, 0x00, 0x00, 128]);
		assert_eq!(image.pixel(1), [0x00, 0x00, 0xFF, 64]);
	}

	#[test]
	fn zero_alpha_32bpp_bmp_is_opaque() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("noalpha.bmp");
		let bytes = bmp(2, 1, 32, &[&[0x10, 0x20, 0x30, 0x00, 0x40, 0x50, 0x60, 0x00]]);
		fs::write(&path, bytes).unwrap();

		let image = get_image(&path).unwrap();
		assert_eq!(image.source_channels, 3);
		assert_eq!(image.pixel(0), [0x30, 0x20, 0x10, 0xFF]);
		assert_eq!(image.pixel(1), [0x60, 0x50, 0x40, 0xFF]);
	}

	#[test]
	fn short_dib_header_is_an_error() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("short.bmp");
		// 26 bytes, but the DIB header claims 40
		let bytes: Vec<u8> = bmp(1, 1, 24, &[&[0, 0, 0]])[..26].to_vec();
		fs::write(&path, bytes).unwrap();

		assert!(matches!(get_image(&path), Err(SpriteError::BmpDecode { .. })));
	}

	#[test]
	fn unknown_compression_is_an_error() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("odd.bmp");
		let mut bytes: Vec<u8> = bmp(1, 1, 24, &[&[0, 0, 0]]);
		bytes[0x1E..0x22].copy_from_slice(&9u32.to_le_bytes());
		fs::write(&path, bytes).unwrap();

		let error = get_image(&path).unwrap_err();
		assert!(error.to_string().contains("unknown compression id 9"));
	}

	#[test]
	fn oversized_image_is_rejected() {
		assert!(matches!(checked_dimensions(70000, 1), Err(SpriteError::DimensionsTooLarge { width: 70000, height: 1 })));
		assert_eq!(checked_dimensions(65535, 65535).unwrap(), (65535, 65535));
	}

	#[test]
	fn indexed_png_expands_palette_and_transparency() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("indexed.png");

		let file = File::create(&path).unwrap();
		let mut encoder = png::Encoder::new(BufWriter::new(file), 2, 1);
		encoder.set_color(png::ColorType::Indexed);
		encoder.set_depth(png::BitDepth::Eight);
		encoder.set_palette(vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF]);
		encoder.set_trns(vec![0xFF, 0x00]);
		let mut writer = encoder.write_header().unwrap();
		writer.write_image_data(&[1, 0]).unwrap();
		drop(writer);

		let image = get_png(&path).unwrap();
		assert_eq!(image.source_channels, 4);
		assert_eq!(image.pixel(0), [0x00, 0x00, 0xFF, 0x00]);
		assert_eq!(image.pixel(1), [0xFF, 0x00, 0x00, 0xFF]);
	}

	#[test]
	fn grayscale_png_is_spread_to_rgb() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("gray.png");
		write_png(&path, 2, 1, png::ColorType::Grayscale, &[0x00, 0xC8]);

		let image = get_png(&path).unwrap();
		assert_eq!(image.source_channels, 1);
		assert_eq!(image.pixels, vec![0x00, 0x00, 0x00, 0xFF, 0xC8, 0xC8, 0xC8, 0xFF]);
	}

	#[test]
	fn sixteen_bit_png_keeps_high_bytes() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("deep.png");

		let file = File::create(&path).unwrap();
		let mut encoder = png::Encoder::new(BufWriter::new(file), 1, 1);
		encoder.set_color(png::ColorType::Rgb);
		encoder.set_depth(png::BitDepth::Sixteen);
		let mut writer = encoder.write_header().unwrap();
		writer.write_image_data(&[0x12, 0x34, 0xAB, 0xCD, 0x00, 0xFF]).unwrap();
		drop(writer);

		assert_eq!(get_png(&path).unwrap().pixel(0), [0x12, 0xAB, 0x00, 0xFF]);
	}
}
