//! `treemap`: record campus trees, log observations and learn how trees work.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
