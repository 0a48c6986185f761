use crate::domain::models::RunConfig;
use crate::services::declaration::DeclarationResult;
use crate::services::loader::{FileSystemLoader, LoadError, TokenLoader};
use crate::services::paths::{absolutize, relative_to};
use crate::services::storage::WriteRegistry;
use std::path::Path;
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("cannot resolve the working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

/// Drives fetch → convert → validate → format for one source file at a time.
/// Cheap to clone; clones share the loader, its cache and the write registry.
#[derive(Clone)]
pub struct Creator {
    config: Arc<RunConfig>,
    loader: Arc<dyn TokenLoader>,
    registry: Arc<WriteRegistry>,
}

impl Creator {
    pub fn new(config: RunConfig) -> Self {
        let loader = FileSystemLoader::new(config.root_dir.clone());
        Self::with_loader(config, loader)
    }

    pub fn with_loader(config: RunConfig, loader: impl TokenLoader + 'static) -> Self {
        Self {
            config: Arc::new(config),
            loader: Arc::new(loader),
            registry: Arc::new(WriteRegistry::default()),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn clear_cache(&self) {
        self.loader.clear_cache();
    }

    /// Builds the declaration for `source` (absolute or relative to the
    /// working directory). Nothing is written; call `persist` on the result.
    pub async fn create(
        &self,
        source: impl AsRef<Path>,
        initial_contents: Option<&str>,
        clear_cache: bool,
    ) -> Result<DeclarationResult, CreateError> {
        let cwd = std::env::current_dir().map_err(CreateError::WorkingDir)?;
        let absolute = absolutize(source.as_ref(), &cwd);
        let input_dir = absolutize(&self.config.input_dir(), &cwd);
        let rel_input_path = relative_to(&input_dir, &absolute);

        if clear_cache {
            self.loader.clear_cache();
        }
        let tokens = self.loader.fetch(&absolute, initial_contents).await?;
        log::debug!(
            "{}: {} tokens",
            rel_input_path.display(),
            tokens.len()
        );

        Ok(DeclarationResult::format(
            tokens.into_keys().collect(),
            rel_input_path,
            Arc::clone(&self.config),
            Arc::clone(&self.registry),
        ))
    }
}
