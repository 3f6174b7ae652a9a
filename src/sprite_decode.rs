//! Decoding of sprite asset pixel data.
//!
//! Both layouts skip the 4-byte asset header and take their dimensions from
//! the caller. The declared size is compared with the bytes actually present
//! and the [`ValidationPolicy`] decides whether a mismatch is fatal.

use tracing::{debug, warn};

use crate::asset_header;
use crate::error::{Result, SpriteError};
use crate::shared_types::{
	AlphaPixel,
	PixelFormat,
	SpriteDescriptor,
	SpritePixels,
	ValidationPolicy,
};


/// Compares the declared pixel data size with what the asset holds.
pub fn check_size(descriptor: &SpriteDescriptor, format: PixelFormat, actual: usize, policy: ValidationPolicy) -> Result<()> {
	let expected: usize = descriptor.pixel_count() * format.bytes_per_pixel();

	if actual == expected {
		return Ok(());
	}

	match policy {
		ValidationPolicy::Strict => Err(SpriteError::SizeMismatch {
			expected: expected,
			actual: actual,
		}),

		ValidationPolicy::Lenient => {
			warn!("Expected {} bytes, got {} bytes", expected, actual);
			Ok(())
		},
	}
}


pub fn decode(asset: &[u8], descriptor: &SpriteDescriptor, format: PixelFormat, policy: ValidationPolicy) -> Result<SpritePixels> {
	let data: &[u8] = asset_header::pixel_bytes(asset);
	check_size(descriptor, format, data.len(), policy)?;

	let pixels: SpritePixels = match format {
		PixelFormat::Rgb565 => SpritePixels::Rgb565(decode_rgb565(data)),
		PixelFormat::Rgb565Alpha8 => SpritePixels::Rgb565Alpha8(decode_rgb565_alpha8(data, descriptor.pixel_count())?),
	};

	debug!("Decoded {} pixels from {} bytes", pixels.len(), data.len());
	return Ok(pixels);
}


/// Every whole big-endian pair; a dangling odd byte is dropped.
pub fn decode_rgb565(data: &[u8]) -> Vec<u16> {
	data.chunks_exact(2)
		.map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
		.collect()
}


/// Exactly `pixel_count` pixels; surplus bytes are ignored.
pub fn decode_rgb565_alpha8(data: &[u8], pixel_count: usize) -> Result<Vec<AlphaPixel>> {
	let needed: usize = pixel_count * PixelFormat::Rgb565Alpha8.bytes_per_pixel();

	if data.len() < needed {
		return Err(SpriteError::TruncatedAsset {
			needed: needed,
			available: data.len(),
		});
	}

	let pixels: Vec<AlphaPixel> = data[..needed]
		.chunks_exact(3)
		.map(|triple| AlphaPixel {
			color: u16::from_le_bytes([triple[0], triple[1]]),
			alpha: triple[2],
		})
		.collect();

	return Ok(pixels);
}
