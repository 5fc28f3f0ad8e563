//! SpaceScout: directory size reconnaissance.
//!
//! Thin binary entry point. All logic lives in the `spacescout-core`
//! and `spacescout-cli` crates.

use clap::Parser;
use spacescout_cli::Args;

fn main() {
    let args = Args::parse();

    // Structured logging on stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_max_level(args.verbosity())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("SpaceScout starting");

    std::process::exit(spacescout_cli::run(&args));
}
