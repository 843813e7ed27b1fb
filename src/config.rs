//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ordertree/ordertree.toml`
//! 3. Explicit config file (`--config <FILE>`)
//! 4. Environment variables: `ORDERTREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::RenderStyle;

/// How pricing trees are rendered as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Spaces per depth level (must be at least 1)
    pub indent_width: usize,
    /// Currency suffix appended to prices, e.g. "RUB"
    pub currency: Option<String>,
    pub item_label: String,
    pub group_label: String,
    pub total_price_label: String,
    pub order_label: String,
    pub contents_label: String,
    pub total_label: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let style = RenderStyle::default();
        Self {
            indent_width: style.indent_width,
            currency: style.currency,
            item_label: style.item_label,
            group_label: style.group_label,
            total_price_label: style.total_price_label,
            order_label: style.order_label,
            contents_label: style.contents_label,
            total_label: style.total_label,
        }
    }
}

impl RenderSettings {
    pub fn to_style(&self) -> RenderStyle {
        RenderStyle {
            indent_width: self.indent_width,
            currency: self.currency.clone(),
            item_label: self.item_label.clone(),
            group_label: self.group_label.clone(),
            total_price_label: self.total_price_label.clone(),
            order_label: self.order_label.clone(),
            contents_label: self.contents_label.clone(),
            total_label: self.total_label.clone(),
        }
    }
}

/// Unified configuration for ordertree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub render: RenderSettings,
}

/// Get the XDG config directory for ordertree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ordertree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ordertree.toml"))
}

/// Expand `~` and `$VAR` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_from(global.as_deref(), explicit)
    }

    /// Load settings from the given global and explicit files.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut builder = Self::defaults_builder()?;

        if let Some(global_path) = global {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ORDERTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults_builder() -> Result<ConfigBuilder<config::builder::DefaultState>, ApplicationError> {
        let defaults = RenderSettings::default();
        Config::builder()
            .set_default("render.indent_width", defaults.indent_width as i64)
            .map_err(config_err)?
            .set_default("render.item_label", defaults.item_label)
            .map_err(config_err)?
            .set_default("render.group_label", defaults.group_label)
            .map_err(config_err)?
            .set_default("render.total_price_label", defaults.total_price_label)
            .map_err(config_err)?
            .set_default("render.order_label", defaults.order_label)
            .map_err(config_err)?
            .set_default("render.contents_label", defaults.contents_label)
            .map_err(config_err)?
            .set_default("render.total_label", defaults.total_label)
            .map_err(config_err)
    }

    /// Reject settings that would break rendering.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.render.indent_width == 0 {
            return Err(ApplicationError::Config {
                message: "render.indent_width must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# ordertree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/ordertree/ordertree.toml
#   Explicit: ordertree --config <FILE>
#   Env:      ORDERTREE_* environment variables, e.g. ORDERTREE_RENDER__INDENT_WIDTH=4

[render]
# Spaces per nesting level (at least 1)
# indent_width = 2

# Currency appended to every price
# currency = "RUB"

# Line labels
# item_label = "Item"
# group_label = "Group"
# total_price_label = "total price"
# order_label = "Order"
# contents_label = "Order contents"
# total_label = "Total"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_render_settings_when_converted_then_matches_default_style() {
        assert_eq!(RenderSettings::default().to_style(), RenderStyle::default());
    }

    #[test]
    fn given_zero_indent_when_validating_then_config_error() {
        let mut settings = Settings::default();
        settings.render.indent_width = 0;

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("indent_width"));
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("parse template");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let mut settings = Settings::default();
        settings.render.currency = Some("RUB".into());

        let shown = settings.to_toml().unwrap();
        assert!(shown.contains("[render]"));
        assert!(shown.contains("currency = \"RUB\""));
    }
}
