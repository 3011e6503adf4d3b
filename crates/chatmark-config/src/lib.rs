//! Configuration management for chatmark.
//!
//! Parses `chatmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.dialect`
//! - `render.disable` (each entry)

mod expand;

use std::path::{Path, PathBuf};

use chatmark_markup::{Dialect, RuleKind, Transformer};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config. Rules in `disable` are
/// added to the rules already disabled by the config file.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markup dialect.
    pub dialect: Option<Dialect>,
    /// Additional rules to switch off.
    pub disable: Vec<RuleKind>,
    /// Override trailing newline handling.
    pub trailing_newline: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "chatmark.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render configuration (names are raw strings from TOML).
    render: RenderConfigRaw,
    /// Output configuration.
    pub output: OutputConfig,

    /// Resolved render configuration (set after loading).
    #[serde(skip)]
    pub render_resolved: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw render configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenderConfigRaw {
    dialect: Option<String>,
    disable: Vec<String>,
}

/// Resolved render configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Markup dialect.
    pub dialect: Dialect,
    /// Rules switched off, in the order they were listed.
    pub disabled: Vec<RuleKind>,
}

impl RenderConfig {
    /// Build the transformer described by this configuration.
    #[must_use]
    pub fn transformer(&self) -> Transformer {
        self.disabled
            .iter()
            .fold(Transformer::new(self.dialect), |t, rule| t.without(*rule))
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Append a newline to rendered output when it lacks one.
    pub trailing_newline: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            trailing_newline: true,
        }
    }
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
        /// Config field path (e.g., "`render.dialect`").
        field: String,
        /// Error message (e.g., "${`CHATMARK_DIALECT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `chatmark.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dialect) = settings.dialect {
            self.render_resolved.dialect = dialect;
        }
        for rule in &settings.disable {
            if !self.render_resolved.disabled.contains(rule) {
                self.render_resolved.disabled.push(*rule);
            }
        }
        if let Some(trailing_newline) = settings.trailing_newline {
            self.output.trailing_newline = trailing_newline;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the disabled rules leave the
    /// dialect with nothing to do.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render_resolved;
        if render.transformer().rules().is_empty() {
            return Err(ConfigError::Validation(format!(
                "render.disable cannot switch off every rule of dialect '{}'",
                render.dialect
            )));
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
        config.resolve_render()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dialect) = self.render.dialect {
            self.render.dialect = Some(expand::expand_env(dialect, "render.dialect")?);
        }
        expand::expand_env_list(&mut self.render.disable, "render.disable")?;
        Ok(())
    }

    /// Parse raw dialect and rule names into the resolved render config.
    fn resolve_render(&mut self) -> Result<(), ConfigError> {
        let dialect = match self.render.dialect.as_deref() {
            Some(name) => name
                .parse::<Dialect>()
                .map_err(|e| ConfigError::Validation(format!("render.dialect: {e}")))?,
            None => Dialect::default(),
        };

        let mut disabled = Vec::with_capacity(self.render.disable.len());
        for name in &self.render.disable {
            let rule = name
                .parse::<RuleKind>()
                .map_err(|e| ConfigError::Validation(format!("render.disable: {e}")))?;
            if disabled.contains(&rule) {
                return Err(ConfigError::Validation(format!(
                    "render.disable lists '{rule}' more than once"
                )));
            }
            disabled.push(rule);
        }

        self.render_resolved = RenderConfig { dialect, disabled };
        Ok(())
    }
}
