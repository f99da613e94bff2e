use clap::Parser;
use servicedoc::cli::{run_cli, Cli};
use servicedoc::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.quiet() {
        log_config = log_config.quiet();
    }
    init_logging_with_config(&log_config)?;

    run_cli(&cli)
}
