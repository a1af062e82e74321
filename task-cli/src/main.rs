use anyhow::Context;
use clap::Parser;
use task_cli::cli::Cli;
use task_cli::config::Config;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::from_env().context("cannot load configuration")?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.level_filter()?)
        .init();
    tracing::debug!(?config, "starting");

    task_cli::run(args.command, &config, &mut std::io::stdout().lock())?;
    Ok(())
}
