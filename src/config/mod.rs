#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{Cli, Command, ExportView, KindArg};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::validate_data_path;

pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Effective settings after layering command-line flags over the optional
/// TOML file: flag, then file value, then built-in default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_file: String,
    pub top_limit: usize,
}

impl Settings {
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file_config = cli
            .config
            .as_deref()
            .map(TomlConfig::from_file)
            .transpose()?;

        let data_file = cli
            .data_file
            .clone()
            .or_else(|| file_config.as_ref().map(|c| c.ledger.data_file.clone()))
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
        validate_data_path("data_file", &data_file)?;

        let top_limit = cli
            .top
            .or_else(|| {
                file_config
                    .as_ref()
                    .and_then(|c| c.reports.as_ref())
                    .and_then(|r| r.top_limit)
            })
            .unwrap_or(DEFAULT_TOP_LIMIT);

        Ok(Self {
            data_file,
            top_limit,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}
