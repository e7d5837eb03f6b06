//! FolderSleuth — terminal folder-size analyser.
//!
//! Thin binary entry point. All logic lives in the `foldersleuth-core`
//! and `foldersleuth-cli` crates.

use clap::Parser;
use foldersleuth_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the report on stdout.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("FolderSleuth starting");

    foldersleuth_cli::run(cli)
}
