use clap::{CommandFactory, Parser};
use tcm::services::config::{load_settings, resolve};
use tcm::Creator;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = std::env::current_dir()?;
    let settings = load_settings(cli.config.as_deref(), &root)?;
    let Some(run) = resolve(&settings.general, cli.overrides(), &root) else {
        Cli::command().print_help()?;
        return Ok(());
    };
    log::debug!("{:?}", run.config);

    let creator = Creator::new(run.config);
    if cli.watch {
        return commands::handle_watch(&cli, &creator, &run.pattern).await;
    }

    let report = commands::handle_generate(&cli, &creator, &run.pattern).await?;
    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} files failed",
            report.failed,
            report.files.len()
        );
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
