//! Configuration file loading with precedence handling.

use super::Theme;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCAMBO_CONFIG";

/// Environment variable overriding the theme.
pub const THEME_ENV: &str = "SCAMBO_THEME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name as written in the config file.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/scambo/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Colour theme ("light" or "dark").
    #[serde(default)]
    pub theme: Option<Theme>,

    /// Items per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Search debounce quiet period in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Simulated provider latency in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Fail every n-th fetch. 0 disables.
    #[serde(default)]
    pub simulate_failures: Option<u32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Colour theme.
    pub theme: Theme,
    /// Items per page. Always at least 1 once validated.
    pub page_size: usize,
    /// Debounce quiet period in milliseconds.
    pub debounce_ms: u64,
    /// Simulated provider latency in milliseconds.
    pub latency_ms: u64,
    /// Fail every n-th fetch, if set.
    pub simulate_failures: Option<NonZeroU32>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            page_size: 6,
            debounce_ms: 300,
            latency_ms: 800,
            simulate_failures: None,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject settings the app cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero page size.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

/// Overrides taken from command-line flags. `None` leaves a setting alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--theme`
    pub theme: Option<Theme>,
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--debounce-ms`
    pub debounce_ms: Option<u64>,
    /// `--latency-ms`
    pub latency_ms: Option<u64>,
    /// `--simulate-failures`
    pub simulate_failures: Option<u32>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/scambo/scambo.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("scambo").join("scambo.log")
    } else {
        PathBuf::from("scambo.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/scambo/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scambo").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SCAMBO_CONFIG` environment variable
/// 3. Default path `~/.config/scambo/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed,
/// or if `SCAMBO_CONFIG` is not valid unicode.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV) {
        Ok(env_path) if !env_path.trim().is_empty() => {
            return load_config_file(PathBuf::from(env_path));
        }
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        _ => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        theme: config.theme.unwrap_or(defaults.theme),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        latency_ms: config.latency_ms.unwrap_or(defaults.latency_ms),
        simulate_failures: config
            .simulate_failures
            .map_or(defaults.simulate_failures, NonZeroU32::new),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SCAMBO_THEME`: Override theme
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] when `SCAMBO_THEME` names an
/// unknown theme.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(theme) = std::env::var(THEME_ENV) {
        config.theme = Theme::from_str(&theme).map_err(|reason| ConfigError::InvalidValue {
            field: "theme",
            reason,
        })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: &CliOverrides) -> ResolvedConfig {
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    if let Some(latency_ms) = cli.latency_ms {
        config.latency_ms = latency_ms;
    }
    if let Some(every) = cli.simulate_failures {
        config.simulate_failures = NonZeroU32::new(every);
    }

    config
}

/// Run the whole precedence chain and validate the result.
///
/// # Errors
///
/// Propagates file, environment and validation errors.
pub fn resolve(
    config_path: Option<PathBuf>,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file))?;
    apply_cli_overrides(config, cli).validate()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
