#![forbid(unsafe_code)]

//! # Springkey CLI
//!
//! ## Usage
//!
//! ```bash
//! springkey sample --from 40 --format json   # Sampled curve as JSON
//! springkey css --from 40 --name slide-in    # CSS keyframes + class rule
//! springkey live --from 40 --fps 60          # One displacement per frame
//! ```

use std::io;

use clap::Parser;
use springkey_cli::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    springkey_cli::init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    springkey_cli::run(&cli, &mut out)
}
