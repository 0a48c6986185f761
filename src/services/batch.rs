use crate::domain::models::{FileReport, FileStatus};
use crate::services::creator::Creator;
use crate::services::storage::PersistStatus;
use futures::future::join_all;
use std::path::{Path, PathBuf};

/// create → persist for one file. Failures land in the report, never abort.
pub async fn process_file(creator: &Creator, path: &Path, clear_cache: bool) -> FileReport {
    let input = path.to_string_lossy().to_string();

    let result = match creator.create(path, None, clear_cache).await {
        Ok(r) => r,
        Err(e) => {
            log::debug!("create failed for {}: {}", input, e);
            return FileReport {
                input,
                output: None,
                status: FileStatus::Failed,
                warnings: vec![],
                error: Some(e.to_string()),
            };
        }
    };

    let warnings = result.warnings().to_vec();
    match result.persist().await {
        Ok(persisted) => FileReport {
            input,
            output: Some(persisted.path.to_string_lossy().to_string()),
            status: match persisted.status {
                PersistStatus::Written => FileStatus::Written,
                PersistStatus::Unchanged => FileStatus::Unchanged,
            },
            warnings,
            error: None,
        },
        Err(e) => FileReport {
            input,
            output: Some(result.output_path().to_string_lossy().to_string()),
            status: FileStatus::Failed,
            warnings,
            error: Some(e.to_string()),
        },
    }
}

/// Runs every file's pipeline concurrently. Reports come back in `files` order.
pub async fn process_all(creator: &Creator, files: &[PathBuf], clear_cache: bool) -> Vec<FileReport> {
    join_all(
        files
            .iter()
            .map(|path| process_file(creator, path, clear_cache)),
    )
    .await
}
