use std::io;

use clap::Parser;
use navrouter::cli::{run_cli, Cli};
use navrouter::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())?;

    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_cli(cli, stdin.lock(), &mut stdout.lock())
}
