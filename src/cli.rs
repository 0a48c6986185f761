use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tcm::domain::models::CasingPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "tcm",
    version,
    about = "Create .css.d.ts from CSS modules *.css files",
    after_help = "Examples:\n  tcm src/styles\n  tcm src -o dist\n  tcm -p 'styles/**/*.icss' -w"
)]
pub struct Cli {
    #[arg(help = "Input directory to search for style sheets")]
    pub search_dir: Option<String>,
    #[arg(
        short = 'c',
        long,
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "camel",
        help = "Convert CSS class tokens to camelCase (`--camel-case=dashes` converts dashes only)"
    )]
    pub camel_case: Option<CamelCase>,
    #[arg(short = 'o', long, help = "Output directory")]
    pub out_dir: Option<String>,
    #[arg(short = 'p', long, help = "Glob pattern with css files")]
    pub pattern: Option<String>,
    #[arg(short = 'w', long, help = "Watch input directory's css files or pattern")]
    pub watch: bool,
    #[arg(short = 'd', long, help = "Drop the input files extension")]
    pub drop_extension: bool,
    #[arg(short = 's', long, help = "Use spaces rather than tabs for indents")]
    pub use_spaces: bool,
    #[arg(short = 'n', long, help = "Don't add semicolons to generated lines")]
    pub no_semicolons: bool,
    #[arg(short = 'v', long, help = "Verbose mode")]
    pub verbose: bool,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, help = "Settings file (defaults to ./tcm.toml when present)")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CamelCase {
    Camel,
    Dashes,
}

impl From<CamelCase> for CasingPolicy {
    fn from(value: CamelCase) -> Self {
        match value {
            CamelCase::Camel => CasingPolicy::CamelCase,
            CamelCase::Dashes => CasingPolicy::DashesOnly,
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> tcm::services::config::Overrides {
        let flag = |set: bool| if set { Some(true) } else { None };
        tcm::services::config::Overrides {
            search_dir: self.search_dir.clone(),
            out_dir: self.out_dir.clone(),
            pattern: self.pattern.clone(),
            casing: self.camel_case.map(CasingPolicy::from),
            drop_extension: flag(self.drop_extension),
            use_spaces: flag(self.use_spaces),
            no_semicolons: flag(self.no_semicolons),
        }
    }
}
