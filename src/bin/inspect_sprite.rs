//! Prints what a sprite asset actually holds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sprite_header::sprite_get::get_asset;
use sprite_header::sprite_inspect::{inspect, InspectionReport};
use sprite_header::{logging, param_validator, PixelFormat};

const USAGE: &[&str] = &[
	"Usage: inspect_sprite <sprite_file.sprite> [--alpha]",
];


#[derive(Parser)]
#[command(name = "inspect_sprite")]
#[command(about = "Show the contents of a binary sprite asset")]
#[command(version)]
struct Cli {
	/// Sprite asset to inspect
	input: PathBuf,

	/// Asset holds RGB565 + Alpha8 pixels
	#[arg(long)]
	alpha: bool,
}


fn main() -> Result<()> {
	logging::init();

	let cli: Cli = param_validator::parse_or_usage(USAGE);
	let format: PixelFormat = if cli.alpha { PixelFormat::Rgb565Alpha8 } else { PixelFormat::Rgb565 };

	let data: Vec<u8> = get_asset(&cli.input)
		.with_context(|| format!("Failed to inspect {}", cli.input.display()))?;
	let report: InspectionReport = inspect(&data, format)
		.with_context(|| format!("Failed to inspect {}", cli.input.display()))?;

	println!("File: {}", cli.input.display());
	println!("{}", report);
	Ok(())
}
