use crate::utils::error::{LedgerError, Result};
use crate::utils::validation::{validate_data_path, Validate};
use serde::{Deserialize, Serialize};

/// Optional file-based configuration. Command-line flags always take
/// precedence over values given here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub ledger: LedgerSection,
    pub reports: Option<ReportsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    pub data_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsSection {
    pub top_limit: Option<usize>,
}

impl TomlConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LedgerError::ConfigError {
            message: format!("cannot read config file {}: {}", path, e),
        })?;
        let config: TomlConfig = toml::from_str(&content).map_err(|e| LedgerError::ConfigError {
            message: format!("cannot parse config file {}: {}", path, e),
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_data_path("ledger.data_file", &self.ledger.data_file)?;

        if let Some(reports) = &self.reports {
            if let Some(limit) = reports.top_limit {
                if limit == 0 {
                    return Err(LedgerError::validation(
                        "reports.top_limit",
                        limit,
                        "limit must be at least 1",
                    ));
                }
            }
        }

        Ok(())
    }
}
