use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Args, Parser};

use crate::shared_types::{
	ConvertOptions,
	PixelFormat,
	SpriteDescriptor,
	ValidationPolicy,
};


/// Positional arguments shared by both header converters.
#[derive(Args, Debug, Clone)]
pub struct HeaderArgs {
	/// Binary sprite asset
	pub input: PathBuf,

	/// Header file to write
	pub output: PathBuf,

	/// Declared pixel width
	pub width: u16,

	/// Declared pixel height
	pub height: u16,

	/// Identifier for the generated constants and include guard
	pub sprite_name: String,

	/// Fail instead of warning when the asset size disagrees with width x height
	#[arg(long)]
	pub strict: bool,
}

impl HeaderArgs {
	pub fn descriptor(&self) -> SpriteDescriptor {
		SpriteDescriptor {
			name: self.sprite_name.clone(),
			width: self.width,
			height: self.height,
		}
	}

	pub fn options(&self, format: PixelFormat) -> ConvertOptions {
		ConvertOptions {
			format: format,
			policy: if self.strict { ValidationPolicy::Strict } else { ValidationPolicy::Lenient },
		}
	}
}


/// Parses `args` (program name first) without exiting.
pub fn validate<T, I, S>(args: I) -> Result<T, clap::Error>
where
	T: Parser,
	I: IntoIterator<Item = S>,
	S: Into<OsString> + Clone,
{
	T::try_parse_from(args)
}


/// Parses the process arguments. Help and version print as usual; any other
/// problem prints `usage` and exits with status 1.
pub fn parse_or_usage<T: Parser>(usage: &[&str]) -> T {
	match validate::<T, _, _>(std::env::args_os()) {
		Ok(parsed) => parsed,

		Err(error) => match error.kind() {
			ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),

			_ => {
				for line in usage {
					println!("{}", line);
				}
				process::exit(1);
			},
		},
	}
}
