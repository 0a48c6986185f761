use crate::cli::Cli;
use tcm::domain::models::GenerateReport;
use tcm::services::{batch, discovery, output};
use tcm::Creator;

pub async fn handle_generate(
    cli: &Cli,
    creator: &Creator,
    pattern: &str,
) -> anyhow::Result<GenerateReport> {
    let search_dir = creator.config().input_dir();
    let files = discovery::discover(&search_dir, pattern)?;
    if files.is_empty() {
        log::info!(
            "no files match {}",
            discovery::full_pattern(&search_dir, pattern)
        );
    }

    let mut report = GenerateReport::new(pattern);
    for file in batch::process_all(creator, &files, false).await {
        report.push(file);
    }
    output::print_report(cli.json, &report, cli.verbose)?;
    Ok(report)
}
