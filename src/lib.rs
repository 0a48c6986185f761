//! Typed CSS Modules: turn the class names exported by a CSS module into a
//! `.d.ts` declaration file.
//!
//! ## Layers
//! - `domain` — configuration, validation outcomes and report structs (data only).
//! - `services` — the token-to-declaration pipeline and its side-effect helpers.
//!
//! ## Typical use
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use tcm::{Creator, RunConfig};
//!
//! let creator = Creator::new(RunConfig::builder().search_dir("src").build());
//! let result = creator.create("src/app.css", None, false).await?;
//! for warning in result.warnings() {
//!     log::warn!("{warning}");
//! }
//! result.persist().await?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod services;

pub use domain::models::{CasingPolicy, RunConfig, RunConfigBuilder, ValidationOutcome};
pub use services::creator::{CreateError, Creator};
pub use services::declaration::DeclarationResult;
pub use services::loader::{FileSystemLoader, LoadError, TokenCache, TokenLoader, TokenMap};
pub use services::storage::{PersistError, PersistStatus, Persisted};
