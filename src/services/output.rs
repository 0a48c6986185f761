use crate::domain::models::{FileReport, FileStatus, GenerateReport, JsonOut};
use serde::Serialize;

pub fn print_json<T: Serialize>(data: T, ok: bool) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok, data })?
    );
    Ok(())
}

/// One compact JSON object per line, for long-running watch sessions.
pub fn print_json_line<T: Serialize>(data: T, ok: bool) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(&JsonOut { ok, data })?);
    Ok(())
}

/// Human-readable lines for one file. Warnings only with `verbose`.
pub fn print_file(file: &FileReport, verbose: bool) {
    match file.status {
        FileStatus::Written | FileStatus::Unchanged => {
            let verb = if file.status == FileStatus::Written {
                "Wrote"
            } else {
                "Unchanged"
            };
            println!("{} {}", verb, file.output.as_deref().unwrap_or(&file.input));
            if verbose {
                for w in &file.warnings {
                    eprintln!("[Warn] {}", w);
                }
            }
        }
        FileStatus::Failed => {
            eprintln!(
                "[Error] {}",
                file.error.as_deref().unwrap_or("unknown failure")
            );
        }
    }
}

pub fn print_report(json: bool, report: &GenerateReport, verbose: bool) -> anyhow::Result<()> {
    if json {
        return print_json(report, report.failed == 0);
    }
    for file in &report.files {
        print_file(file, verbose);
    }
    Ok(())
}
