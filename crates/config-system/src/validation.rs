//! Configuration validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ConfigError, InitPosition, LinkedOptions, Result, TemplateContents, TooltipConfig};

static ROW_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{.*?\}\}").unwrap());

static CSS_LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(auto|-?\d+(\.\d+)?(px|%|em|rem|vh|vw)?)$").unwrap()
});

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &TooltipConfig) -> Result<()> {
        if let crate::ContentsOption::Template(contents) = &config.contents {
            Self::validate_contents(contents)?;
        }

        Self::validate_linked(&config.linked)?;

        if config.init.show {
            Self::validate_init_position(&config.init.position)?;
        }

        Ok(())
    }

    /// Validate template contents
    fn validate_contents(contents: &TemplateContents) -> Result<()> {
        if let Some(bindto) = &contents.bindto {
            if bindto.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "contents.bindto must not be empty".to_string(),
                ));
            }
        }

        if let Some(template) = &contents.template {
            let stripped = template.replace(['\r', '\n', '\t'], "");
            let blocks = ROW_BLOCK.find_iter(&stripped).count();
            if blocks != 1 {
                return Err(ConfigError::Validation(format!(
                    "Invalid contents.template: expected exactly one {{{{...}}}} row block, found {}",
                    blocks
                )));
            }
        }

        Ok(())
    }

    /// Validate the link group
    fn validate_linked(linked: &LinkedOptions) -> Result<()> {
        if linked.enabled && !linked.name.is_empty() && linked.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "linked.name must not be whitespace only".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate initial tooltip offsets
    fn validate_init_position(position: &InitPosition) -> Result<()> {
        for (field, value) in [("top", &position.top), ("left", &position.left)] {
            if !CSS_LENGTH.is_match(value.trim()) {
                return Err(ConfigError::Validation(format!(
                    "Invalid init.position.{}: {}. Must be a CSS length",
                    field, value
                )));
            }
        }

        Ok(())
    }
}
