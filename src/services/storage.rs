use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersistStatus {
    Written,
    /// Same bytes as the last successful write to this path; nothing touched.
    Unchanged,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Persisted {
    pub path: PathBuf,
    pub status: PersistStatus,
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn content_hash(contents: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents.as_bytes());
    hex::encode(hasher.finalize())
}

/// `create_dir_all`: an existing directory is not an error.
pub async fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| PersistError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

/// Writes to a sibling temp file, then renames over `path`.
pub async fn write_atomic(path: &Path, contents: &str) -> Result<(), PersistError> {
    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(
        ".{}.{}-{}.tmp",
        file_name,
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    tokio::fs::write(&tmp, contents.as_bytes())
        .await
        .map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }
    Ok(())
}

/// Serializes writes per output path and remembers what was last written there.
#[derive(Default, Debug)]
pub struct WriteRegistry {
    slots: std::sync::Mutex<HashMap<PathBuf, Arc<AsyncMutex<Option<String>>>>>,
}

impl WriteRegistry {
    fn slot(&self, path: &Path) -> Arc<AsyncMutex<Option<String>>> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(slots.entry(path.to_path_buf()).or_default())
    }

    pub async fn persist(&self, path: &Path, contents: &str) -> Result<Persisted, PersistError> {
        let slot = self.slot(path);
        let mut last_hash = slot.lock().await;
        let hash = content_hash(contents);

        if last_hash.as_deref() == Some(hash.as_str())
            && tokio::fs::try_exists(path).await.unwrap_or(false)
        {
            log::debug!("{} unchanged, skipping write", path.display());
            return Ok(Persisted {
                path: path.to_path_buf(),
                status: PersistStatus::Unchanged,
            });
        }

        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }
        write_atomic(path, contents).await?;
        log::debug!("wrote {} ({})", path.display(), &hash[..12]);
        *last_hash = Some(hash);

        Ok(Persisted {
            path: path.to_path_buf(),
            status: PersistStatus::Written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{content_hash, ensure_dir, write_atomic, PersistStatus, WriteRegistry};
    use tempfile::TempDir;

    #[test]
    fn content_hash_is_stable_sha256() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(content_hash("a"), content_hash("a"));
        assert_ne!(content_hash("a"), content_hash("b"));
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path().join("a/b/c");
        ensure_dir(&dir).await.expect("first create");
        ensure_dir(&dir).await.expect("second create");
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn write_atomic_overwrites_and_leaves_no_temp_files() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("out.d.ts");
        write_atomic(&path, "first\n").await.expect("write");
        write_atomic(&path, "second\n").await.expect("overwrite");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "second\n");
        let entries = std::fs::read_dir(tmp.path()).expect("list").count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn registry_skips_identical_content() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("nested/out.d.ts");
        let registry = WriteRegistry::default();

        let first = registry.persist(&path, "x\n").await.expect("write");
        let second = registry.persist(&path, "x\n").await.expect("rewrite");
        let third = registry.persist(&path, "y\n").await.expect("change");

        assert_eq!(first.status, PersistStatus::Written);
        assert_eq!(second.status, PersistStatus::Unchanged);
        assert_eq!(third.status, PersistStatus::Written);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "y\n");
    }

    #[tokio::test]
    async fn registry_rewrites_a_deleted_file() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("out.d.ts");
        let registry = WriteRegistry::default();

        registry.persist(&path, "x\n").await.expect("write");
        std::fs::remove_file(&path).expect("remove");
        let again = registry.persist(&path, "x\n").await.expect("rewrite");

        assert_eq!(again.status, PersistStatus::Written);
        assert!(path.exists());
    }
}
