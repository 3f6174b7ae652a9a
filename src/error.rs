use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum SpriteError {
	#[error("could not access '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("expected {expected} bytes of pixel data, got {actual}")]
	SizeMismatch {
		expected: usize,
		actual: usize,
	},

	#[error("truncated asset: {needed} bytes of pixel data needed, only {available} available")]
	TruncatedAsset {
		needed: usize,
		available: usize,
	},

	#[error("could not decode PNG '{}': {source}", path.display())]
	ImageDecode {
		path: PathBuf,
		#[source]
		source: png::DecodingError,
	},

	#[error("could not read BMP '{}': {reason}", path.display())]
	BmpDecode {
		path: PathBuf,
		reason: String,
	},

	#[error("image is {width}x{height}, sprites are limited to 65535px per side")]
	DimensionsTooLarge {
		width: u32,
		height: u32,
	},

	#[error("unsupported image {0}")]
	UnsupportedImage(String),

	#[error("could not pack pixel stream")]
	PixelStream(#[source] io::Error),

	#[error("could not render header text")]
	Format(#[from] fmt::Error),
}


impl SpriteError {
	pub fn io(path: impl Into<PathBuf>, source: io::Error) -> SpriteError {
		return SpriteError::Io {
			path: path.into(),
			source: source,
		};
	}
}


pub type Result<T> = std::result::Result<T, SpriteError>;
