//! bayes CLI binary.

use std::process;

use bayes::cli::{args::*, commands::*};
use clap::Parser;

fn main() {
    // Parse command line arguments using clap
    let args = BayesArgs::parse();

    // Verbosity picks the default level; RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        if let Some(hint) = error_hint(&e) {
            eprintln!("Hint: {hint}");
        }
        process::exit(1);
    }
}
