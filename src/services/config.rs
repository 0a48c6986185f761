use crate::domain::constants::{DEFAULT_CONFIG_FILE, DEFAULT_PATTERN};
use crate::domain::models::{CasingPolicy, RunConfig, SettingsFile, SettingsGeneral};
use std::path::{Path, PathBuf};

/// Reads `explicit`, or `<root>/tcm.toml` when present. A missing default file
/// is not an error; a missing explicit one is.
pub fn load_settings(explicit: Option<&Path>, root: &Path) -> anyhow::Result<SettingsFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = root.join(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(SettingsFile::default());
            }
            p
        }
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    let settings: SettingsFile = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid settings in {}: {}", path.display(), e))?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Values given on the command line. `None` defers to the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub search_dir: Option<String>,
    pub out_dir: Option<String>,
    pub pattern: Option<String>,
    pub casing: Option<CasingPolicy>,
    pub drop_extension: Option<bool>,
    pub use_spaces: Option<bool>,
    pub no_semicolons: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRun {
    pub config: RunConfig,
    pub pattern: String,
}

/// Merges flags over file settings. `None` when there is neither a search
/// directory nor a pattern to work from.
pub fn resolve(general: &SettingsGeneral, overrides: Overrides, root: &Path) -> Option<ResolvedRun> {
    let pattern = overrides.pattern.or_else(|| general.pattern.clone());
    let search_dir = match (overrides.search_dir, &pattern) {
        (Some(dir), _) => dir,
        (None, Some(_)) => "./".to_string(),
        (None, None) => return None,
    };
    let out_dir = overrides.out_dir.or_else(|| general.out_dir.clone());

    let mut builder = RunConfig::builder()
        .root_dir(root)
        .search_dir(&search_dir)
        .casing(overrides.casing.or(general.camel_case).unwrap_or_default())
        .drop_extension(overrides.drop_extension.or(general.drop_extension).unwrap_or(false))
        .use_spaces(overrides.use_spaces.or(general.use_spaces).unwrap_or(false))
        .no_semicolons(overrides.no_semicolons.or(general.no_semicolons).unwrap_or(false));
    if let Some(out) = out_dir {
        builder = builder.out_dir(PathBuf::from(out));
    }

    Some(ResolvedRun {
        config: builder.build(),
        pattern: pattern.unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
    })
}
