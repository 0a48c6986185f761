use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tcm::services::paths::relative_to;
use tcm::{
    CasingPolicy, CreateError, Creator, LoadError, PersistStatus, RunConfig, TokenCache,
    TokenLoader, TokenMap,
};
use tempfile::TempDir;

/// In-memory loader: tests swap the "file contents" under a path.
#[derive(Default)]
struct MemoryLoader {
    files: Mutex<HashMap<PathBuf, Vec<String>>>,
    cache: TokenCache,
    reads: AtomicUsize,
}

impl MemoryLoader {
    fn set(&self, path: &Path, tokens: &[&str]) {
        self.files
            .lock()
            .expect("files lock")
            .insert(path.to_path_buf(), tokens.iter().map(|t| t.to_string()).collect());
    }
}

#[async_trait]
impl TokenLoader for MemoryLoader {
    async fn fetch(
        &self,
        path: &Path,
        initial_contents: Option<&str>,
    ) -> Result<TokenMap, LoadError> {
        if let Some(contents) = initial_contents {
            return Ok(contents
                .split_whitespace()
                .map(|t| (t.to_string(), t.to_string()))
                .collect());
        }
        if let Some(hit) = self.cache.get(path) {
            return Ok(hit);
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        let files = self.files.lock().expect("files lock");
        let tokens: TokenMap = files
            .get(path)
            .ok_or_else(|| LoadError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })?
            .iter()
            .map(|t| (t.clone(), t.clone()))
            .collect();
        self.cache.put(path.to_path_buf(), tokens.clone());
        Ok(tokens)
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }
}

struct Fixture {
    _tmp: TempDir,
    root: PathBuf,
    loader: Arc<MemoryLoader>,
    creator: Creator,
}

/// Lets the fixture keep a handle on the loader it gave to the creator.
struct SharedLoader(Arc<MemoryLoader>);

#[async_trait]
impl TokenLoader for SharedLoader {
    async fn fetch(
        &self,
        path: &Path,
        initial_contents: Option<&str>,
    ) -> Result<TokenMap, LoadError> {
        self.0.fetch(path, initial_contents).await
    }

    fn clear_cache(&self) {
        self.0.clear_cache();
    }
}

fn fixture(casing: CasingPolicy) -> Fixture {
    let tmp = TempDir::new().expect("temp dir");
    let root = tmp.path().to_path_buf();
    let loader = Arc::new(MemoryLoader::default());
    let config = RunConfig::builder()
        .root_dir(&root)
        .search_dir("src")
        .out_dir("types")
        .casing(casing)
        .build();
    let creator = Creator::with_loader(config, SharedLoader(Arc::clone(&loader)));
    Fixture {
        _tmp: tmp,
        root,
        loader,
        creator,
    }
}

#[tokio::test]
async fn members_keep_loader_order_and_validity() {
    let fx = fixture(CasingPolicy::Identity);
    let source = fx.root.join("src/a.css");
    fx.loader.set(&source, &["zeta", "1st-item", "", "alpha", "class"]);

    let result = fx.creator.create(&source, None, false).await.expect("create");

    assert_eq!(
        result.lines(),
        [
            "\tzeta: string;",
            "\t'1st-item': string;",
            "\talpha: string;",
            "\t'class': string;"
        ]
    );
    assert_eq!(result.tokens(), ["zeta", "1st-item", "", "alpha", "class"]);
    assert_eq!(
        result.warnings(),
        [
            "1st-item is not a valid identifier. Adding quotes.",
            " is not a valid identifier and was skipped.",
            "class is not a valid identifier. Adding quotes."
        ]
    );
}

#[tokio::test]
async fn create_is_deterministic() {
    let fx = fixture(CasingPolicy::CamelCase);
    let source = fx.root.join("src/a.css");
    fx.loader.set(&source, &["btn-primary", "is_open", "Header"]);

    let first = fx.creator.create(&source, None, false).await.expect("create");
    let second = fx.creator.create(&source, None, true).await.expect("create");

    assert_eq!(first.render(), second.render());
    assert!(first.render().contains("\tbtnPrimary: string;\n\tisOpen: string;\n\theader: string;\n"));
}

#[tokio::test]
async fn clear_cache_picks_up_changed_tokens() {
    let fx = fixture(CasingPolicy::Identity);
    let source = fx.root.join("src/a.css");
    fx.loader.set(&source, &["old"]);
    fx.creator.create(&source, None, false).await.expect("create");

    fx.loader.set(&source, &["new"]);
    let stale = fx.creator.create(&source, None, false).await.expect("create");
    let fresh = fx.creator.create(&source, None, true).await.expect("create");

    assert_eq!(stale.tokens(), ["old"]);
    assert_eq!(fresh.tokens(), ["new"]);
    assert_eq!(fx.loader.reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn initial_contents_bypass_the_file() {
    let fx = fixture(CasingPolicy::Identity);
    let source = fx.root.join("src/unsaved.css");

    let result = fx
        .creator
        .create(&source, Some("held buffer"), false)
        .await
        .expect("create");

    assert_eq!(result.tokens(), ["held", "buffer"]);
    assert_eq!(fx.loader.reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn loader_failure_is_returned_unchanged() {
    let fx = fixture(CasingPolicy::Identity);
    let err = fx
        .creator
        .create(fx.root.join("src/missing.css"), None, false)
        .await
        .expect_err("missing");

    match err {
        CreateError::Load(LoadError::Io { path, source }) => {
            assert!(path.ends_with("src/missing.css"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn persist_twice_is_idempotent() {
    let fx = fixture(CasingPolicy::Identity);
    let source = fx.root.join("src/deep/nested/a.css");
    fx.loader.set(&source, &["one", "two"]);
    let result = fx.creator.create(&source, None, false).await.expect("create");

    let first = result.persist().await.expect("persist");
    let content = std::fs::read_to_string(&first.path).expect("read");
    let second = result.persist().await.expect("persist again");

    assert_eq!(first.path, fx.root.join("types/deep/nested/a.css.d.ts"));
    assert_eq!(first.status, PersistStatus::Written);
    assert_eq!(second.status, PersistStatus::Unchanged);
    assert_eq!(std::fs::read_to_string(&second.path).expect("read"), content);
    assert!(content.ends_with("export = styles;\n"));
    assert!(!content.contains('\r'));
}

#[tokio::test]
async fn relative_sources_resolve_against_working_directory() {
    let fx = fixture(CasingPolicy::Identity);
    let cwd = std::env::current_dir().expect("cwd");
    let absolute = fx.root.join("src/a.css");
    fx.loader.set(&absolute, &["x"]);
    let relative = relative_to(&cwd, &absolute);

    let result = fx.creator.create(&relative, None, false).await.expect("create");

    assert_eq!(result.relative_input_path(), Path::new("a.css"));
    assert_eq!(result.input_path(), absolute);
}

#[tokio::test]
async fn concurrent_persists_to_one_path_leave_one_complete_file() {
    let fx = fixture(CasingPolicy::Identity);
    let source = fx.root.join("src/a.css");
    fx.loader.set(&source, &["a", "b", "c"]);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let creator = fx.creator.clone();
        let source = source.clone();
        handles.push(tokio::spawn(async move {
            let result = creator.create(&source, None, true).await.expect("create");
            result.persist().await.expect("persist")
        }));
    }
    let mut written = 0;
    for h in handles {
        if h.await.expect("join").status == PersistStatus::Written {
            written += 1;
        }
    }

    assert_eq!(written, 1);
    let content = std::fs::read_to_string(fx.root.join("types/a.css.d.ts")).expect("read");
    assert!(content.contains("\ta: string;\n\tb: string;\n\tc: string;\n"));
}
