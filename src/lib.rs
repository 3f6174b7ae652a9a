//! Sprite asset tooling: raw RGB565 sprite assets to C headers, plus the
//! PNG/BMP encoder and inspector that produce and check those assets.

pub mod asset_header;
pub mod convert;
pub mod error;
pub mod logging;
pub mod param_validator;
pub mod rgb565;
pub mod shared_types;
pub mod sprite_decode;
pub mod sprite_get;
pub mod sprite_inspect;
pub mod sprite_make;

pub use convert::{convert_bytes, convert_sprite, encode_image, EncodeReport};
pub use error::{Result, SpriteError};
pub use shared_types::{
	AlphaPixel,
	ConversionReport,
	ConvertOptions,
	PixelFormat,
	SpriteDescriptor,
	SpritePixels,
	ValidationPolicy,
};
