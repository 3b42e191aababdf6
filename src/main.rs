use anyhow::Result;
use balear::cli::{runner, Cli};
use clap::Parser;

fn main() -> Result<()> {
    // Logs go to stderr so table/JSON output stays pipeable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    runner::run(cli)
}
