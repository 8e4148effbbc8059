//! Configuration management for spirit card tooling.
//!
//! Parses `spirit.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Icon asset references support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `icons.base_url`
//! - `icons.custom.<name>.vector`
//! - `icons.custom.<name>.raster`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use spirit_format::{
    DEFAULT_ICON_BASE, DEFAULT_MAX_DEPTH, FormatterConfig, IconAsset, IconRegistry,
    is_valid_icon_name,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override per-pass debug logging.
    pub debug: Option<bool>,
    /// Override the nesting limit.
    pub max_depth: Option<usize>,
    /// Override the icon asset base.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "spirit.toml";

/// Largest accepted `format.max_depth`.
const MAX_DEPTH_LIMIT: usize = 32;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formatter configuration.
    pub format: FormatConfig,
    /// Icon asset configuration.
    pub icons: IconsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Formatter configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Log every format pass.
    pub debug: bool,
    /// Deepest nesting of `[align]` / `[u]` blocks.
    pub max_depth: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Icon asset configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Prefix of the bundled icon assets.
    pub base_url: String,
    /// Extra icons by shortcode name.
    pub custom: BTreeMap<String, CustomIcon>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ICON_BASE.to_owned(),
            custom: BTreeMap::new(),
        }
    }
}

/// A custom icon. Missing references default to `<base_url>/<name>.svg`
/// and `<base_url>/<name>.png`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomIcon {
    /// Vector asset reference.
    pub vector: Option<String>,
    /// Raster asset reference.
    pub raster: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`icons.base_url`").
        field: String,
        /// Error message (e.g., "${`ICON_CDN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Whether an asset reference is used as written rather than joined to the base.
fn is_absolute_ref(reference: &str) -> bool {
    reference.starts_with('/') || reference.starts_with("data:") || reference.contains("://")
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `spirit.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(debug) = settings.debug {
            self.format.debug = debug;
        }
        if let Some(max_depth) = settings.max_depth {
            self.format.max_depth = max_depth;
        }
        if let Some(base_url) = &settings.base_url {
            self.icons.base_url.clone_from(base_url);
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_format()?;
        self.validate_icons()?;
        Ok(())
    }

    fn validate_format(&self) -> Result<(), ConfigError> {
        let depth = self.format.max_depth;
        if !(1..=MAX_DEPTH_LIMIT).contains(&depth) {
            return Err(ConfigError::Validation(format!(
                "format.max_depth must be between 1 and {MAX_DEPTH_LIMIT}, got {depth}"
            )));
        }
        Ok(())
    }

    fn validate_icons(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.icons.base_url, "icons.base_url")?;

        for (name, icon) in &self.icons.custom {
            if !is_valid_icon_name(name) {
                return Err(ConfigError::Validation(format!(
                    "icons.custom.{name} is not a valid icon name"
                )));
            }
            if let Some(vector) = &icon.vector {
                require_non_empty(vector, &format!("icons.custom.{name}.vector"))?;
            }
            if let Some(raster) = &icon.raster {
                require_non_empty(raster, &format!("icons.custom.{name}.raster"))?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.icons.base_url = expand::expand_env(&self.icons.base_url, "icons.base_url")?;

        for (name, icon) in &mut self.icons.custom {
            if let Some(ref vector) = icon.vector {
                icon.vector = Some(expand::expand_env(
                    vector,
                    &format!("icons.custom.{name}.vector"),
                )?);
            }
            if let Some(ref raster) = icon.raster {
                icon.raster = Some(expand::expand_env(
                    raster,
                    &format!("icons.custom.{name}.raster"),
                )?);
            }
        }

        Ok(())
    }

    /// Icon registry: the bundled set under `icons.base_url` plus custom icons.
    #[must_use]
    pub fn icon_registry(&self) -> IconRegistry {
        let base = self.icons.base_url.trim_end_matches('/');
        let resolve = |reference: Option<&str>, default: String| match reference {
            Some(r) if is_absolute_ref(r) => r.to_owned(),
            Some(r) => format!("{base}/{}", r.trim_start_matches("./")),
            None => default,
        };

        let mut registry = IconRegistry::with_base(base);
        for (name, icon) in &self.icons.custom {
            let default = IconAsset::from_stem(name, base, &name.to_ascii_lowercase());
            registry.insert(IconAsset::new(
                name,
                resolve(icon.vector.as_deref(), default.vector),
                resolve(icon.raster.as_deref(), default.raster),
            ));
        }
        registry
    }

    /// Formatter settings.
    #[must_use]
    pub fn formatter_config(&self) -> FormatterConfig {
        FormatterConfig {
            debug: self.format.debug,
            max_depth: self.format.max_depth,
        }
    }
}
