use std::collections::BTreeMap;
use std::fmt;

use crate::asset_header::{self, AssetHeader};
use crate::error::{Result, SpriteError};
use crate::rgb565;
use crate::shared_types::{
	AlphaPixel,
	PixelFormat,
	ALPHA_CUTOFF,
	TRANSPARENT_KEY,
};
use crate::sprite_decode;

const SAMPLE_LIMIT: usize = 10;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSample {
	pub x: usize,
	pub y: usize,
	pub color: u16,
	pub alpha: Option<u8>,
}


#[derive(Debug, Clone)]
pub struct InspectionReport {
	pub format: PixelFormat,
	pub width: u16,
	pub height: u16,
	pub transparent_count: usize,
	pub opaque_count: usize,
	pub transparent_samples: Vec<PixelSample>,
	pub opaque_samples: Vec<PixelSample>,
	/// Alpha value to pixel count, alpha sprites only.
	pub alpha_histogram: BTreeMap<u8, usize>,
}

impl InspectionReport {
	pub fn total_pixels(&self) -> usize {
		return self.transparent_count + self.opaque_count;
	}

	fn percent(&self, count: usize) -> usize {
		match self.total_pixels() {
			0 => 0,
			total => count * 100 / total,
		}
	}
}


/// Walks every pixel the embedded header declares.
pub fn inspect(data: &[u8], format: PixelFormat) -> Result<InspectionReport> {
	let header: AssetHeader = asset_header::get_header(data).ok_or(SpriteError::TruncatedAsset {
		needed: asset_header::HEADER_SIZE,
		available: data.len(),
	})?;

	let total: usize = header.width as usize * header.height as usize;
	let pixel_data: &[u8] = asset_header::pixel_bytes(data);

	let pixels: Vec<AlphaPixel> = match format {
		PixelFormat::Rgb565 => {
			let needed: usize = total * format.bytes_per_pixel();
			if pixel_data.len() < needed {
				return Err(SpriteError::TruncatedAsset {
					needed: needed,
					available: pixel_data.len(),
				});
			}

			sprite_decode::decode_rgb565(&pixel_data[..needed])
				.into_iter()
				.map(|color| AlphaPixel { color: color, alpha: 0xFF })
				.collect()
		},

		PixelFormat::Rgb565Alpha8 => sprite_decode::decode_rgb565_alpha8(pixel_data, total)?,
	};

	let mut report = InspectionReport {
		format: format,
		width: header.width,
		height: header.height,
		transparent_count: 0,
		opaque_count: 0,
		transparent_samples: Vec::new(),
		opaque_samples: Vec::new(),
		alpha_histogram: BTreeMap::new(),
	};

	for (index, pixel) in pixels.iter().enumerate() {
		let transparent: bool = match format {
			PixelFormat::Rgb565 => pixel.color == TRANSPARENT_KEY,
			PixelFormat::Rgb565Alpha8 => {
				*report.alpha_histogram.entry(pixel.alpha).or_insert(0) += 1;
				pixel.alpha < ALPHA_CUTOFF
			},
		};

		let sample = PixelSample {
			x: index % header.width as usize,
			y: index / header.width as usize,
			color: pixel.color,
			alpha: match format {
				PixelFormat::Rgb565 => None,
				PixelFormat::Rgb565Alpha8 => Some(pixel.alpha),
			},
		};

		if transparent {
			report.transparent_count += 1;
			if report.transparent_samples.len() < SAMPLE_LIMIT {
				report.transparent_samples.push(sample);
			}
		}

		else {
			report.opaque_count += 1;
			if report.opaque_samples.len() < SAMPLE_LIMIT {
				report.opaque_samples.push(sample);
			}
		}
	}

	return Ok(report);
}


fn write_sample(f: &mut fmt::Formatter<'_>, sample: &PixelSample, transparent: bool) -> fmt::Result {
	write!(f, "  Pixel [{},{}]: 0x{:04X}", sample.x, sample.y, sample.color)?;

	if let Some(alpha) = sample.alpha {
		write!(f, " alpha {}", alpha)?;
	}

	if transparent {
		writeln!(f, " (TRANSPARENT)")
	} else {
		let [r, g, b] = rgb565::to_rgb888(sample.color);
		writeln!(f, " -> RGB({},{},{})", r, g, b)
	}
}


impl fmt::Display for InspectionReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let transparent_label: String = match self.format {
			PixelFormat::Rgb565 => format!("0x{:04X}", TRANSPARENT_KEY),
			PixelFormat::Rgb565Alpha8 => format!("alpha < {}", ALPHA_CUTOFF),
		};

		writeln!(f, "=== Sprite File Inspector ===")?;
		writeln!(f, "Dimensions: {}x{}", self.width, self.height)?;
		writeln!(f, "Total pixels: {}", self.total_pixels())?;
		writeln!(f)?;

		writeln!(f, "=== First {} Transparent Pixels ({}) ===", SAMPLE_LIMIT, transparent_label)?;
		for sample in &self.transparent_samples {
			write_sample(f, sample, true)?;
		}

		writeln!(f, "=== First {} Opaque Pixels ===", SAMPLE_LIMIT)?;
		for sample in &self.opaque_samples {
			write_sample(f, sample, false)?;
		}

		if !self.alpha_histogram.is_empty() {
			writeln!(f)?;
			writeln!(f, "=== Alpha Histogram ===")?;
			for (alpha, count) in &self.alpha_histogram {
				let label: &str = if *alpha < 128 { "TRANSPARENT" } else { "OPAQUE" };
				writeln!(f, "  Alpha {}: {} pixels ({})", alpha, count, label)?;
			}
		}

		writeln!(f)?;
		writeln!(f, "=== Summary ===")?;
		writeln!(f, "Transparent pixels ({}): {} ({}%)", transparent_label, self.transparent_count, self.percent(self.transparent_count))?;
		writeln!(f, "Opaque pixels: {} ({}%)", self.opaque_count, self.percent(self.opaque_count))?;
		writeln!(f)?;

		if self.transparent_count == 0 {
			writeln!(f, "WARNING: No transparent pixels found!")?;
			write!(f, "The source image might not have alpha channel data.")
		} else if self.opaque_count == 0 {
			writeln!(f, "WARNING: All pixels are transparent!")?;
			write!(f, "The source image might be completely transparent or empty.")
		} else {
			write!(f, "✓ Sprite looks valid!")
		}
	}
}
