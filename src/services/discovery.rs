use crate::services::paths::normalize;
use std::path::{Path, PathBuf};

/// `<search_dir>/<pattern>` as one glob pattern string.
pub fn full_pattern(search_dir: &Path, pattern: &str) -> String {
    normalize(&search_dir.join(pattern))
        .to_string_lossy()
        .to_string()
}

/// Files matching `pattern` under `search_dir`, sorted.
pub fn discover(search_dir: &Path, pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let full = full_pattern(search_dir, pattern);
    let mut files = Vec::new();
    for entry in glob::glob(&full)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("skipping {}: {}", e.path().display(), e.error()),
        }
    }
    files.sort();
    Ok(files)
}

/// Matcher for watch events, built from the same pattern `discover` uses.
#[derive(Debug, Clone)]
pub struct StyleMatcher {
    pattern: glob::Pattern,
}

impl StyleMatcher {
    pub fn new(search_dir: &Path, pattern: &str) -> anyhow::Result<Self> {
        Ok(Self {
            pattern: glob::Pattern::new(&full_pattern(search_dir, pattern))?,
        })
    }

    /// `*` stops at `/`, as it does in `glob::glob`.
    pub fn matches(&self, path: &Path) -> bool {
        let options = glob::MatchOptions {
            require_literal_separator: true,
            ..glob::MatchOptions::new()
        };
        self.pattern.matches_path_with(path, options)
    }
}
