use crate::error::{Result, RulefmtError};
use crate::rule::ColumnNames;
use crate::text::FormatOptions;
use crate::util::format::DEFAULT_PRECISION;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    precision: Option<u32>,
    columns: Option<ColumnNames>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: Option<PathBuf>,
    pub precision: u32,
    pub columns: Option<ColumnNames>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            precision: DEFAULT_PRECISION,
            columns: None,
        }
    }
}

impl Config {
    /// Resolve and load the configuration file: explicit override, then
    /// `RULEFMT_CONFIG`, then the XDG config directory. A missing file gives
    /// defaults.
    pub fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(path) = config_override {
            Some(path)
        } else if let Ok(env_path) = std::env::var("RULEFMT_CONFIG") {
            Some(PathBuf::from(env_path))
        } else {
            BaseDirectories::with_prefix("rulefmt")
                .ok()
                .and_then(|xdg| xdg.find_config_file("rulefmt.toml"))
        };

        match config_path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                log::debug!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)
            .map_err(|e| RulefmtError::Config(format!("Failed to parse TOML: {}", e)))?;

        let precision = file.precision.unwrap_or(DEFAULT_PRECISION);
        FormatOptions::with_precision(precision)?;

        Ok(Self {
            config_path: None,
            precision,
            columns: file.columns,
        })
    }

    /// Options for the configured precision, optionally overridden by a
    /// command-line value under the same bound as the config file.
    pub fn format_options(&self, precision_override: Option<u32>) -> Result<FormatOptions> {
        FormatOptions::with_precision(precision_override.unwrap_or(self.precision))
    }
}
