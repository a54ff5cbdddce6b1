//! Configuration file parser for multiple formats

use crate::{ConfigError, Result, TooltipConfig, TooltipOptions};
use std::fs;
use std::path::Path;

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Configuration parser
pub struct ConfigParser;

impl ConfigParser {
    /// Parse and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<TooltipConfig> {
        let options = Self::parse_file(path)?;
        TooltipConfig::from_options(options)
    }

    /// Parse declarative options from a file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<TooltipOptions> {
        let path = path.as_ref();

        // Read file content
        let content = fs::read_to_string(path)?;

        // Detect format from extension
        let format = Self::detect_format(path)?;

        log::debug!("Parsing tooltip options from {} as {:?}", path.display(), format);
        Self::parse_string(&content, format)
    }

    /// Parse declarative options from a string
    pub fn parse_string(content: &str, format: ConfigFormat) -> Result<TooltipOptions> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("YAML parse error: {}", e))),
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e))),
        }
    }

    /// Detect configuration format from file extension
    pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ConfigError::Parse("Cannot determine config format from file extension".to_string())
        })?;

        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::Parse(format!(
                "Unsupported config format: {}",
                ext
            ))),
        }
    }

    /// Serialize declarative options back to a string
    pub fn to_string(options: &TooltipOptions, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Yaml => serde_yaml::to_string(options)
                .map_err(|e| ConfigError::Parse(format!("YAML serialize error: {}", e))),
            ConfigFormat::Json => serde_json::to_string_pretty(options)
                .map_err(|e| ConfigError::Parse(format!("JSON serialize error: {}", e))),
            ConfigFormat::Toml => toml::to_string_pretty(options)
                .map_err(|e| ConfigError::Parse(format!("TOML serialize error: {}", e))),
        }
    }
}
