//! bp - Blueprint kit command-line interface.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bpkit::cli::output;
use bpkit::cli::{execute, Cli, Context};
use bpkit::core::constants;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("bpkit=debug")
        } else {
            EnvFilter::new("bpkit=warn")
        }
    });

    // stdout carries secrets and JSON; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let ctx = Context::new(cli.config);
    if let Err(e) = execute(cli.command, &ctx) {
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
