//! ccpctl binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccp_client::cli::{self, Cli, args::extract_json_flag, output::print_error};

fn main() -> ExitCode {
    let (args, json) = extract_json_flag(std::env::args_os());
    let cli = Cli::parse_from(args);

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            print_error(&format!("failed to create async runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::run(cli, json)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
