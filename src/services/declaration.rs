use crate::domain::constants::{
    DECLARATION_EXTENSION, DECLARE_STYLES, EXPORT_STYLES, INDEX_SIGNATURE_KEY, INTERFACE_CLOSE,
    INTERFACE_OPEN, LINE_SEPARATOR,
};
use crate::domain::models::RunConfig;
use crate::services::paths::{normalize, strip_extension};
use crate::services::storage::{PersistError, Persisted, WriteRegistry};
use crate::services::validator::{quote_key, validate};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Member lines plus warnings for one ordered token list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderedMembers {
    pub lines: Vec<String>,
    pub messages: Vec<String>,
}

/// convert → validate → render, in token order. The first member to claim a
/// display name keeps it; later collisions are skipped with a warning.
pub fn render_members<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
    config: &RunConfig,
) -> RenderedMembers {
    let mut out = RenderedMembers::default();
    let mut seen = HashSet::new();

    for raw in tokens {
        let name = config.casing.convert(raw);
        let outcome = validate(&name);
        if let Some(message) = outcome.message {
            out.messages.push(message);
        }
        if !outcome.is_valid {
            continue;
        }
        if !seen.insert(name.clone()) {
            out.messages.push(format!(
                "{} (from {}) duplicates an earlier member and was skipped.",
                name, raw
            ));
            continue;
        }
        let key = if outcome.needs_quotes {
            quote_key(&name)
        } else {
            name
        };
        out.lines.push(member_line(&key, "string", config));
    }
    out
}

fn member_line(key: &str, ty: &str, config: &RunConfig) -> String {
    format!("{}{}: {}{}", config.indent, key, ty, config.terminator)
}

/// Rendered declaration for one source file. Immutable; `persist` only
/// touches the filesystem.
#[derive(Debug, Clone)]
pub struct DeclarationResult {
    config: Arc<RunConfig>,
    registry: Arc<WriteRegistry>,
    rel_input_path: PathBuf,
    raw_tokens: Vec<String>,
    lines: Vec<String>,
    messages: Vec<String>,
}

impl DeclarationResult {
    pub fn format(
        raw_tokens: Vec<String>,
        rel_input_path: PathBuf,
        config: Arc<RunConfig>,
        registry: Arc<WriteRegistry>,
    ) -> Self {
        let rendered = render_members(raw_tokens.iter().map(String::as_str), &config);
        Self {
            config,
            registry,
            rel_input_path,
            raw_tokens,
            lines: rendered.lines,
            messages: rendered.messages,
        }
    }

    /// Member lines, without the surrounding interface text.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every token the loader produced, including skipped ones.
    pub fn tokens(&self) -> &[String] {
        &self.raw_tokens
    }

    pub fn warnings(&self) -> &[String] {
        &self.messages
    }

    pub fn relative_input_path(&self) -> &Path {
        &self.rel_input_path
    }

    pub fn input_path(&self) -> PathBuf {
        normalize(&self.config.input_dir().join(&self.rel_input_path))
    }

    pub fn output_path(&self) -> PathBuf {
        let name = if self.config.drop_extension {
            strip_extension(&self.rel_input_path)
        } else {
            self.rel_input_path.clone()
        };
        let mut out = self.config.output_dir().join(name).into_os_string();
        out.push(DECLARATION_EXTENSION);
        normalize(Path::new(&out))
    }

    /// Full file text, `\n`-separated with a trailing `\n`.
    pub fn render(&self) -> String {
        let terminator = &self.config.terminator;
        let mut out: Vec<String> = Vec::with_capacity(self.lines.len() + 5);
        out.push(INTERFACE_OPEN.to_string());
        out.push(member_line(INDEX_SIGNATURE_KEY, "string", &self.config));
        out.extend(self.lines.iter().cloned());
        out.push(INTERFACE_CLOSE.to_string());
        out.push(format!("{}{}", DECLARE_STYLES, terminator));
        out.push(format!("{}{}", EXPORT_STYLES, terminator));

        let mut text = out.join(LINE_SEPARATOR);
        text.push_str(LINE_SEPARATOR);
        text
    }

    /// Creates missing directories and writes `render()` to `output_path()`.
    pub async fn persist(&self) -> Result<Persisted, PersistError> {
        self.registry
            .persist(&self.output_path(), &self.render())
            .await
    }
}
