//! PNG or BMP image to binary sprite asset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use sprite_header::convert::{default_asset_path, EncodeReport};
use sprite_header::shared_types::ALPHA_CUTOFF;
use sprite_header::{encode_image, logging, param_validator, rgb565, PixelFormat};

const USAGE: &[&str] = &[
	"Usage: png_to_sprite <input.png|input.bmp> [output.sprite] [--alpha] [-v]",
	"",
	"Output format:",
	"  - Width: uint16_t (2 bytes, little-endian)",
	"  - Height: uint16_t (2 bytes, little-endian)",
	"  - Pixels: RGB565 big-endian (2 bytes), or with --alpha",
	"            RGB565 little-endian + Alpha8 (3 bytes)",
];


#[derive(Parser)]
#[command(name = "png_to_sprite")]
#[command(about = "Convert a PNG or BMP image to a binary sprite asset")]
#[command(version)]
struct Cli {
	/// Input PNG or BMP
	input: PathBuf,

	/// Output .sprite file (defaults to the input with a .sprite extension)
	output: Option<PathBuf>,

	/// Write RGB565 + Alpha8 pixels instead of color-keyed RGB565
	#[arg(long)]
	alpha: bool,

	/// Show the first 10 pixels
	#[arg(short, long)]
	verbose: bool,
}


fn print_samples(report: &EncodeReport) {
	info!("=== First {} Pixels ===", report.samples.len());

	for (index, rgba) in report.samples.iter().enumerate() {
		let [r, g, b, a] = *rgba;
		let x: usize = index % report.width as usize;
		let y: usize = index / report.width as usize;
		let value: u16 = rgb565::packed_value(*rgba, report.format);
		let label: &str = if a < ALPHA_CUTOFF { "TRANSPARENT" } else { "OPAQUE" };

		info!("Pixel [{},{}]: RGBA({},{},{},{}) -> 0x{:04X} ({})", x, y, r, g, b, a, value, label);
	}
}


fn main() -> Result<()> {
	logging::init();

	let cli: Cli = param_validator::parse_or_usage(USAGE);
	let format: PixelFormat = if cli.alpha { PixelFormat::Rgb565Alpha8 } else { PixelFormat::Rgb565 };
	let output: PathBuf = cli.output.unwrap_or_else(|| default_asset_path(&cli.input));

	let report: EncodeReport = encode_image(&cli.input, &output, format)
		.with_context(|| format!("Failed to convert {}", cli.input.display()))?;

	if cli.verbose {
		print_samples(&report);
	}

	if report.source_channels < 4 {
		warn!("Source image has no alpha channel, every pixel is treated as opaque");
	}

	else if report.transparent_count == 0 {
		warn!("No transparent pixels found, but the source has an alpha channel (alpha >= {} everywhere)", ALPHA_CUTOFF);
	}

	let total: usize = report.pixel_count().max(1);
	let label: &str = match format {
		PixelFormat::Rgb565 => "RGB565",
		PixelFormat::Rgb565Alpha8 => "RGB565+Alpha8",
	};

	println!("✓ Converted ({}) {} → {}", label, report.source_path.display(), report.target_path.display());
	println!("  Dimensions: {}x{}", report.width, report.height);
	println!("  Pixels: {}", report.pixel_count());
	println!("  Size: {} bytes ({} bytes/pixel)", report.file_size, format.bytes_per_pixel());
	println!("  Transparent pixels: {} ({}%)", report.transparent_count, report.transparent_count * 100 / total);
	println!("  Opaque pixels: {} ({}%)", report.opaque_count(), report.opaque_count() * 100 / total);

	Ok(())
}
