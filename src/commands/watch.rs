use crate::cli::Cli;
use std::path::PathBuf;
use tcm::services::discovery::{self, StyleMatcher};
use tcm::services::watch::StyleWatcher;
use tcm::services::{batch, output};
use tcm::Creator;

/// Runs until interrupted. Each event gets its own independent pipeline.
pub async fn handle_watch(cli: &Cli, creator: &Creator, pattern: &str) -> anyhow::Result<()> {
    let search_dir = creator.config().input_dir();
    let matcher = StyleMatcher::new(&search_dir, pattern)?;
    // Subscribe before the initial pass so edits made during it are not lost.
    let mut watcher = StyleWatcher::new(&search_dir, matcher)?;

    if !cli.json {
        println!(
            "Watch {}...",
            discovery::full_pattern(&search_dir, pattern)
        );
    }

    for path in discovery::discover(&search_dir, pattern)? {
        spawn_regenerate(cli, creator, path);
    }

    loop {
        tokio::select! {
            change = watcher.next_change() => match change {
                Some(path) => spawn_regenerate(cli, creator, path),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupted, stopping watch");
                break;
            }
        }
    }
    Ok(())
}

fn spawn_regenerate(cli: &Cli, creator: &Creator, path: PathBuf) {
    let creator = creator.clone();
    let (json, verbose) = (cli.json, cli.verbose);
    tokio::spawn(async move {
        let report = batch::process_file(&creator, &path, true).await;
        let ok = report.error.is_none();
        if json {
            if let Err(e) = output::print_json_line(&report, ok) {
                log::error!("cannot print report for {}: {}", path.display(), e);
            }
        } else {
            output::print_file(&report, verbose);
        }
    });
}
