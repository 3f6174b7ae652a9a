use std::fmt;
use std::path::PathBuf;

/// Magenta color key used by RGB565 sprites without an alpha channel.
pub const TRANSPARENT_KEY: u16 = 0xF81F;

/// Alpha values below this count as transparent when packing and inspecting.
pub const ALPHA_CUTOFF: u8 = 10;


#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum PixelFormat {
	/// One RGB565 value per pixel, big-endian in the asset.
	Rgb565,
	/// RGB565 little-endian followed by one alpha byte.
	Rgb565Alpha8,
}

impl PixelFormat {
	pub fn bytes_per_pixel(self) -> usize {
		match self {
			PixelFormat::Rgb565 => 2,
			PixelFormat::Rgb565Alpha8 => 3,
		}
	}

	/// Entries written per line of the generated array.
	pub fn entries_per_line(self) -> usize {
		match self {
			PixelFormat::Rgb565 => 8,
			PixelFormat::Rgb565Alpha8 => 4,
		}
	}
}


#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum ValidationPolicy {
	/// Warn on a size mismatch and decode what is there.
	#[default]
	Lenient,
	/// Refuse any asset whose size disagrees with the declared dimensions.
	Strict,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteDescriptor {
	pub name: String,
	pub width: u16,
	pub height: u16,
}

impl SpriteDescriptor {
	pub fn pixel_count(&self) -> usize {
		return self.width as usize * self.height as usize;
	}

	pub fn guard_macro(&self) -> String {
		return format!("SPRITE_{}_H", self.name.to_uppercase());
	}
}


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AlphaPixel {
	pub color: u16,
	pub alpha: u8,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpritePixels {
	Rgb565(Vec<u16>),
	Rgb565Alpha8(Vec<AlphaPixel>),
}

impl SpritePixels {
	pub fn len(&self) -> usize {
		match self {
			SpritePixels::Rgb565(pixels) => pixels.len(),
			SpritePixels::Rgb565Alpha8(pixels) => pixels.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		return self.len() == 0;
	}

	pub fn format(&self) -> PixelFormat {
		match self {
			SpritePixels::Rgb565(_) => PixelFormat::Rgb565,
			SpritePixels::Rgb565Alpha8(_) => PixelFormat::Rgb565Alpha8,
		}
	}
}


#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
	pub format: PixelFormat,
	pub policy: ValidationPolicy,
}


/// Summary of one asset-to-header conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
	pub source_path: PathBuf,
	pub target_path: PathBuf,
	pub width: u16,
	pub height: u16,
	pub pixel_count: usize,
	pub byte_size: usize,
	pub format: PixelFormat,
}

impl fmt::Display for ConversionReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "✓ Converted {} → {}", self.source_path.display(), self.target_path.display())?;
		writeln!(f, "  Dimensions: {}x{}", self.width, self.height)?;
		writeln!(f, "  Pixels: {}", self.pixel_count)?;

		match self.format {
			PixelFormat::Rgb565 => write!(f, "  Size: {} bytes", self.byte_size),
			PixelFormat::Rgb565Alpha8 => write!(f, "  Size: {} bytes (3 bytes/pixel: RGB565+Alpha8)", self.byte_size),
		}
	}
}


/// RGBA8 image as loaded from a PNG or BMP.
#[derive(Debug, Clone)]
pub struct RgbaImage {
	pub width: u16,
	pub height: u16,
	/// Channels present in the source before promotion to RGBA.
	pub source_channels: u8,
	pub pixels: Vec<u8>,
}

impl RgbaImage {
	pub fn pixel(&self, index: usize) -> [u8; 4] {
		let offset: usize = index * 4;
		return [
			self.pixels[offset],
			self.pixels[offset + 1],
			self.pixels[offset + 2],
			self.pixels[offset + 3],
		];
	}

	pub fn pixel_count(&self) -> usize {
		return self.width as usize * self.height as usize;
	}
}
