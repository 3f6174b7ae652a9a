//! RGB565 sprite asset to C header.

use anyhow::{Context, Result};
use clap::Parser;

use sprite_header::param_validator::{self, HeaderArgs};
use sprite_header::{convert_sprite, logging, PixelFormat};

const USAGE: &[&str] = &[
	"Usage: sprite_to_header <input.sprite> <output.h> <width> <height> <sprite_name> [--strict]",
	"Example: sprite_to_header skeleton.sprite skeleton.h 59 43 skeleton",
];


#[derive(Parser)]
#[command(name = "sprite_to_header")]
#[command(about = "Convert an RGB565 sprite asset to a C header")]
#[command(version)]
struct Cli {
	#[command(flatten)]
	header: HeaderArgs,
}


fn main() -> Result<()> {
	logging::init();

	let cli: Cli = param_validator::parse_or_usage(USAGE);
	let args: HeaderArgs = cli.header;

	let report = convert_sprite(&args.input, &args.output, &args.descriptor(), args.options(PixelFormat::Rgb565))
		.with_context(|| format!("Failed to convert {}", args.input.display()))?;

	println!("{}", report);
	Ok(())
}
