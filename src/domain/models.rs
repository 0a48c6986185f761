use crate::domain::constants::{SEMICOLON, SPACE_INDENT, TAB_INDENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// How raw token names are rewritten before validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasingPolicy {
    #[default]
    #[serde(rename = "none", alias = "identity")]
    Identity,
    #[serde(rename = "camel", alias = "camelCase")]
    CamelCase,
    /// Only `-` boundaries are collapsed, the way css-loader names its exports.
    #[serde(rename = "dashes")]
    DashesOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub needs_quotes: bool,
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn bare() -> Self {
        Self {
            is_valid: true,
            needs_quotes: false,
            message: None,
        }
    }

    pub fn quoted(message: String) -> Self {
        Self {
            is_valid: true,
            needs_quotes: true,
            message: Some(message),
        }
    }

    pub fn skipped(message: String) -> Self {
        Self {
            is_valid: false,
            needs_quotes: false,
            message: Some(message),
        }
    }
}

/// Settings for one run. Built once, shared read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub root_dir: PathBuf,
    pub search_dir: PathBuf,
    pub out_dir: PathBuf,
    pub casing: CasingPolicy,
    pub drop_extension: bool,
    pub indent: String,
    pub terminator: String,
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// `<root>/<search>`: the directory input paths are made relative to.
    pub fn input_dir(&self) -> PathBuf {
        self.root_dir.join(&self.search_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root_dir.join(&self.out_dir)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig::builder().build()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunConfigBuilder {
    root_dir: Option<PathBuf>,
    search_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    casing: CasingPolicy,
    drop_extension: bool,
    use_spaces: bool,
    no_semicolons: bool,
}

impl RunConfigBuilder {
    pub fn root_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.root_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn search_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.search_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn casing(mut self, casing: CasingPolicy) -> Self {
        self.casing = casing;
        self
    }

    pub fn drop_extension(mut self, drop: bool) -> Self {
        self.drop_extension = drop;
        self
    }

    pub fn use_spaces(mut self, spaces: bool) -> Self {
        self.use_spaces = spaces;
        self
    }

    pub fn no_semicolons(mut self, none: bool) -> Self {
        self.no_semicolons = none;
        self
    }

    pub fn build(self) -> RunConfig {
        let root_dir = self
            .root_dir
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let search_dir = self.search_dir.unwrap_or_default();
        // Declarations land next to the sources unless told otherwise.
        let out_dir = self.out_dir.unwrap_or_else(|| search_dir.clone());
        RunConfig {
            root_dir,
            search_dir,
            out_dir,
            casing: self.casing,
            drop_extension: self.drop_extension,
            indent: if self.use_spaces {
                SPACE_INDENT
            } else {
                TAB_INDENT
            }
            .to_string(),
            terminator: if self.no_semicolons { "" } else { SEMICOLON }.to_string(),
        }
    }
}

/// `[general]` table of `tcm.toml`. Every field is optional; CLI flags win.
#[derive(Debug, Deserialize, Default)]
pub struct SettingsFile {
    #[serde(default)]
    pub general: SettingsGeneral,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SettingsGeneral {
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub camel_case: Option<CasingPolicy>,
    #[serde(default)]
    pub drop_extension: Option<bool>,
    #[serde(default)]
    pub use_spaces: Option<bool>,
    #[serde(default)]
    pub no_semicolons: Option<bool>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Written,
    Unchanged,
    Failed,
}

#[derive(Serialize, Clone, Debug)]
pub struct FileReport {
    pub input: String,
    pub output: Option<String>,
    pub status: FileStatus,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Default)]
pub struct GenerateReport {
    pub pattern: String,
    pub written: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl GenerateReport {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, file: FileReport) {
        match file.status {
            FileStatus::Written => self.written += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Failed => self.failed += 1,
        }
        self.files.push(file);
    }
}
