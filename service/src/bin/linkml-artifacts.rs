//! `linkml-artifacts` command-line tool

use clap::Parser;
use linkml_artifacts::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(err) = cli::run(&cli) {
        tracing::error!("command failed: {err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
