//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `generate.rs` — one-shot run over every file matching the pattern.
//! - `watch.rs` — initial run, then regenerate on each add/change event.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate pipeline logic to `tcm::services`.
//! - Keep behavior and output schema stable.

pub mod generate;
pub mod watch;

pub use generate::handle_generate;
pub use watch::handle_watch;
