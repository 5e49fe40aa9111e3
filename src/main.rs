#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! retrieve-base-ami — look up the active base AMI for an environment/deployment/play.

mod ami;
mod cli;
mod commands;
mod ec2;
mod types;

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, write_error};

/// Used when `RUST_LOG` is unset. The SDK's own INFO chatter is muted.
const DEFAULT_LOG_FILTER: &str = "info,aws_config=warn";

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(usage_exit_code(&err));
        }
    };

    init_tracing();

    if let Err(err) = commands::dispatch(&cli) {
        let code = err.exit_code();
        write_error(err);
        std::process::exit(code);
    }
}

/// Exit code for a failed parse: 0 for `--help`/`--version`, 1 for any usage error.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
