use anyhow::Context;
use clap::Parser;
use repolyzer::errors::ErrorHandler;
use repolyzer::structs::cli::Cli;
use repolyzer::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let current_dir = std::env::current_dir().context("reading the current directory")?;
    let mut runner = CommandRunner::new(current_dir);

    if let Err(e) = runner.run_command(cli.command).await {
        if e.is_cancellation() {
            log::info!("👋 Cancelled");
            return Ok(());
        }
        ErrorHandler::handle_error(&e);
        std::process::exit(1);
    }
    Ok(())
}
