mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::CliArgs;

fn main() {
	let args = CliArgs::parse();

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
		)
		.init();

	if let Err(e) = commands::run(&args) {
		tracing::debug!(code = e.code(), "command failed");
		if args.json {
			eprintln!("{}", e.to_json());
		} else {
			eprintln!("error[{}]: {}", e.code(), e);
		}
		std::process::exit(1);
	}
}
