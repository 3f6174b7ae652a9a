use std::io;
use bitstream_io::{BitWriter, BitWrite, BigEndian, LittleEndian};

use crate::shared_types::{
	PixelFormat,
	RgbaImage,
	ALPHA_CUTOFF,
	TRANSPARENT_KEY,
};


pub fn pack(r: u8, g: u8, b: u8) -> u16 {
	return ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3);
}


/// Expands to 8 bits per channel by shifting; low bits stay zero.
pub fn to_rgb888(value: u16) -> [u8; 3] {
	return [
		(((value >> 11) & 0x1F) << 3) as u8,
		(((value >> 5) & 0x3F) << 2) as u8,
		((value & 0x1F) << 3) as u8,
	];
}


/// Value stored for one RGBA pixel. Plain RGB565 has no alpha, so nearly
/// transparent pixels collapse to the magenta key.
pub fn packed_value(rgba: [u8; 4], format: PixelFormat) -> u16 {
	match format {
		PixelFormat::Rgb565 if rgba[3] < ALPHA_CUTOFF => TRANSPARENT_KEY,
		_ => pack(rgba[0], rgba[1], rgba[2]),
	}
}


pub fn encode_pixels(image: &RgbaImage, format: PixelFormat) -> io::Result<Vec<u8>> {
	let mut stream: Vec<u8> = Vec::with_capacity(image.pixel_count() * format.bytes_per_pixel());

	match format {
		// Red in the high bits of the first byte
		PixelFormat::Rgb565 => {
			let mut bit_writer = BitWriter::endian(&mut stream, BigEndian);

			for index in 0..image.pixel_count() {
				let [r, g, b, a] = image.pixel(index);

				if a < ALPHA_CUTOFF {
					bit_writer.write(16, TRANSPARENT_KEY)?;
					continue;
				}

				bit_writer.write(5, r >> 3)?;
				bit_writer.write(6, g >> 2)?;
				bit_writer.write(5, b >> 3)?;
			}

			bit_writer.byte_align()?;
		},

		// Least significant bits first, so blue leads
		PixelFormat::Rgb565Alpha8 => {
			let mut bit_writer = BitWriter::endian(&mut stream, LittleEndian);

			for index in 0..image.pixel_count() {
				let [r, g, b, a] = image.pixel(index);

				bit_writer.write(5, b >> 3)?;
				bit_writer.write(6, g >> 2)?;
				bit_writer.write(5, r >> 3)?;
				bit_writer.write(8, a)?;
			}

			bit_writer.byte_align()?;
		},
	}

	return Ok(stream);
}
