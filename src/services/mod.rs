//! Service layer containing the declaration pipeline and side-effect helpers.
//!
//! ## Service map
//! - `casing.rs` — token name casing policies (identity / camelCase / dashes).
//! - `validator.rs` — bare vs quoted vs skipped member classification.
//! - `declaration.rs` — member rendering, `DeclarationResult`, output paths.
//! - `creator.rs` — `Creator`: fetch → convert → validate → format.
//! - `loader.rs` — `TokenLoader` seam, `TokenCache`, file-system loader.
//! - `storage.rs` — directory creation, atomic writes, per-path write registry.
//! - `paths.rs` — lexical path normalization and relativization.
//! - `config.rs` — `tcm.toml` loading and flag merging.
//! - `discovery.rs` — glob expansion and watch-event matching.
//! - `watch.rs` — filesystem watcher feeding changed style sheets.
//! - `batch.rs` — per-file create/persist with failure isolation.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized (`storage.rs`, `loader.rs`).
//! - Keep command handlers thin; delegate to services.

pub mod batch;
pub mod casing;
pub mod config;
pub mod creator;
pub mod declaration;
pub mod discovery;
pub mod loader;
pub mod output;
pub mod paths;
pub mod storage;
pub mod validator;
pub mod watch;
