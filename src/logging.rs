use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;


/// Installs the stdout subscriber. INFO unless `RUST_LOG` says otherwise.
pub fn init() {
	let filter: EnvFilter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("info"));

	// A second call (tests driving several entry points) keeps the first subscriber
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_ansi(io::stdout().is_terminal())
		.without_time()
		.try_init();
}
