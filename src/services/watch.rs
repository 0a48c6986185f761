use crate::services::discovery::StyleMatcher;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

/// Recursive watcher over a search directory that yields changed style sheets.
/// Every qualifying event is delivered; nothing is coalesced.
pub struct StyleWatcher {
    _watcher: RecommendedWatcher,
    changes: UnboundedReceiver<PathBuf>,
}

impl StyleWatcher {
    pub fn new(dir: &Path, matcher: StyleMatcher) -> anyhow::Result<Self> {
        let (tx, rx) = unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if is_content_change(&event.kind) => {
                for path in changed_paths(event) {
                    if matcher.matches(&path) && tx.send(path).is_err() {
                        return;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("watch error: {}", e),
        })?;
        watcher.watch(dir, RecursiveMode::Recursive)?;
        log::debug!("watching {}", dir.display());

        Ok(Self {
            _watcher: watcher,
            changes: rx,
        })
    }

    pub async fn next_change(&mut self) -> Option<PathBuf> {
        self.changes.recv().await
    }
}

/// Added or rewritten files; metadata-only touches, removals and the old
/// name of a rename are ignored.
pub fn is_content_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Paths that now hold content. A two-sided rename lists the old name first.
pub fn changed_paths(event: Event) -> Vec<PathBuf> {
    let mut paths = event.paths;
    if matches!(
        event.kind,
        EventKind::Modify(ModifyKind::Name(RenameMode::Both))
    ) && paths.len() > 1
    {
        paths.remove(0);
    }
    paths
}
