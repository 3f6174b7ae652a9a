use std::path::{Path, PathBuf};

use tracing::info;

use crate::asset_header;
use crate::error::Result;
use crate::shared_types::{
	ConversionReport,
	ConvertOptions,
	PixelFormat,
	SpriteDescriptor,
	SpritePixels,
	ALPHA_CUTOFF,
};
use crate::sprite_decode;
use crate::sprite_get;
use crate::sprite_make;

const SAMPLE_COUNT: usize = 10;


/// Asset in memory to header text. Nothing touches the disk.
pub fn convert_bytes(source_label: &str, asset: &[u8], descriptor: &SpriteDescriptor, options: ConvertOptions) -> Result<(String, SpritePixels)> {
	let pixels: SpritePixels = sprite_decode::decode(asset, descriptor, options.format, options.policy)?;
	let header: String = sprite_make::make_header(source_label, descriptor, &pixels)?;

	return Ok((header, pixels));
}


/// Reads `source_path`, writes the generated header to `target_path`.
///
/// The header is rendered completely before the target is created, so a
/// decode failure leaves no output behind.
pub fn convert_sprite(source_path: &Path, target_path: &Path, descriptor: &SpriteDescriptor, options: ConvertOptions) -> Result<ConversionReport> {
	info!("Converting {} -> {}", source_path.display(), target_path.display());

	let asset: Vec<u8> = sprite_get::get_asset(source_path)?;
	let source_label: String = source_path.display().to_string();
	let (header, pixels) = convert_bytes(&source_label, &asset, descriptor, options)?;

	sprite_make::write_file(target_path, header.as_bytes())?;

	return Ok(ConversionReport {
		source_path: source_path.to_path_buf(),
		target_path: target_path.to_path_buf(),
		width: descriptor.width,
		height: descriptor.height,
		pixel_count: pixels.len(),
		byte_size: asset_header::pixel_bytes(&asset).len(),
		format: options.format,
	});
}


/// Summary of one image-to-asset encode.
#[derive(Debug, Clone)]
pub struct EncodeReport {
	pub source_path: PathBuf,
	pub target_path: PathBuf,
	pub format: PixelFormat,
	pub width: u16,
	pub height: u16,
	pub source_channels: u8,
	pub file_size: usize,
	pub transparent_count: usize,
	/// Leading RGBA pixels, for verbose output.
	pub samples: Vec<[u8; 4]>,
}

impl EncodeReport {
	pub fn pixel_count(&self) -> usize {
		return self.width as usize * self.height as usize;
	}

	pub fn opaque_count(&self) -> usize {
		return self.pixel_count() - self.transparent_count;
	}
}


/// `sprite.png` becomes `sprite.sprite` next to it.
pub fn default_asset_path(source_path: &Path) -> PathBuf {
	source_path.with_extension("sprite")
}


pub fn encode_image(source_path: &Path, target_path: &Path, format: PixelFormat) -> Result<EncodeReport> {
	info!("Converting {} -> {}", source_path.display(), target_path.display());

	let image = sprite_get::get_image(source_path)?;
	let asset: Vec<u8> = sprite_make::make_asset(&image, format)?;
	sprite_make::write_file(target_path, &asset)?;

	let transparent_count: usize = image.pixels
		.chunks_exact(4)
		.filter(|pixel| pixel[3] < ALPHA_CUTOFF)
		.count();

	let samples: Vec<[u8; 4]> = (0..image.pixel_count().min(SAMPLE_COUNT))
		.map(|index| image.pixel(index))
		.collect();

	return Ok(EncodeReport {
		source_path: source_path.to_path_buf(),
		target_path: target_path.to_path_buf(),
		format: format,
		width: image.width,
		height: image.height,
		source_channels: image.source_channels,
		file_size: asset.len(),
		transparent_count: transparent_count,
		samples: samples,
	});
}
