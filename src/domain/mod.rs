//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep configuration, validation and report structs in one place.
//! - Avoid cyclic imports between the pipeline services.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — run configuration, casing policy, validation outcome, reports.
//! - `constants.rs` — fixed declaration text, reserved words, defaults.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in the report structs affect `--json` output.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
