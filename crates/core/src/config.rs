//! Configuration for conflictsweep.
//!
//! A small TOML file with a `[resolve]` section for the filtering behaviour
//! and a `[log]` section for the tracing level. Every field has a default,
//! so an absent file (or an empty one) yields a fully usable config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conflict::Side;
use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Resolve behaviour.
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// The `[resolve]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Which side of each conflict block to keep (default: incoming).
    #[serde(default)]
    pub side: Side,

    /// Write through a same-directory temp file renamed into place
    /// (default: true). `false` overwrites the target directly.
    #[serde(default = "default_true")]
    pub atomic_write: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            side: Side::Incoming,
            atomic_write: true,
        }
    }
}

/// The `[log]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".into()
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Load an [`AppConfig`] from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Validate that all values are sane.
    ///
    /// `resolve.side` is enforced by deserialization; only `log.level` needs
    /// a check here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log.level".into(),
                detail: format!(
                    "unknown level '{}': use one of trace, debug, info, warn, error",
                    self.log.level
                ),
            });
        }
        Ok(())
    }

    /// Load and validate from an explicit path, the platform default
    /// location, or fall back to built-in defaults when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::load_from_file(&p)?,
                _ => {
                    debug!("no configuration file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Platform default config location
    /// (`<config dir>/conflictsweep/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("conflictsweep").join("config.toml"))
    }

    /// Generate a default TOML config template string.
    pub fn default_template() -> &'static str {
        r#"# conflictsweep configuration

[resolve]
# Which side of each conflict block to keep: "incoming" or "current".
side = "incoming"
# Write through a temporary file renamed into place.
atomic_write = true

[log]
# Minimum tracing level: trace, debug, info, warn, error.
level = "warn"
"#
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
