//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/billsplit/billsplit.toml`
//! 3. Environment variables: `BILLSPLIT_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{Currency, Split};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Default party size for a new split.
const DEFAULT_PEOPLE: usize = 2;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub currency: Option<String>,
    pub people: Option<usize>,
    pub total_bill: Option<f64>,
}

/// Starting values for a new split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Display currency (USD, EUR or CAD)
    pub currency: Currency,
    /// Number of people sharing the bill
    pub people: NonZeroUsize,
    /// Bill total
    pub total_bill: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            people: NonZeroUsize::new(DEFAULT_PEOPLE).unwrap_or(NonZeroUsize::MIN),
            total_bill: 0.0,
        }
    }
}

/// Get the XDG config directory for billsplit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "billsplit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("billsplit.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(fs: &dyn FileSystem, path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = fs.read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Build the initial equal split described by these settings.
    pub fn initial_split(&self) -> Split {
        Split::new(self.total_bill, self.people, self.currency)
    }

    /// Merge overlay config onto self (base): overlay wins if specified.
    fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        let currency = match &overlay.currency {
            Some(code) => code.parse::<Currency>().map_err(|e| ApplicationError::Config {
                message: format!("currency: {e}"),
            })?,
            None => self.currency,
        };
        let people = match overlay.people {
            Some(n) => NonZeroUsize::new(n).ok_or_else(|| ApplicationError::Config {
                message: "people must be at least 1".to_string(),
            })?,
            None => self.people,
        };
        let total_bill = match overlay.total_bill {
            Some(total) => validate_total(total)?,
            None => self.total_bill,
        };

        Ok(Self {
            currency,
            people,
            total_bill,
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist when given.
    ///   Without it the global config file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(config_file, Self::env_source())
    }

    /// Load settings using a specific environment source.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        Self::load_from(&RealFileSystem, config_file, env)
    }

    /// Load settings reading config files through `fs`.
    pub fn load_from(
        fs: &dyn FileSystem,
        config_file: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file (explicit file is required, global file is optional)
        let file = match config_file {
            Some(path) => {
                if !fs.exists(path) {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => global_config_path().filter(|p| fs.exists(p)),
        };
        if let Some(path) = file {
            let raw = load_raw_settings(fs, &path)?;
            current = current.merge_with(&raw)?;
        }

        // 3. Apply environment variables (replaces - explicit override)
        current = current.apply_env_overrides(env)?;

        Ok(current)
    }

    /// The `BILLSPLIT_*` environment source.
    pub fn env_source() -> Environment {
        Environment::with_prefix("BILLSPLIT").try_parsing(true)
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        let raw = RawSettings {
            currency: config.get_string("currency").ok(),
            people: optional(config.get::<usize>("people"))?,
            total_bill: optional(config.get::<f64>("total_bill"))?,
        };
        self.merge_with(&raw)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# billsplit configuration
#
# Locations (by precedence, lowest to highest):
#   File:  ~/.config/billsplit/billsplit.toml (or --config <file>)
#   Env:   BILLSPLIT_CURRENCY, BILLSPLIT_PEOPLE, BILLSPLIT_TOTAL_BILL
#   Flags: --currency, --people, --total

# Display currency: USD, EUR or CAD
# currency = "USD"

# Number of people sharing the bill (at least 1)
# people = 2

# Bill total
# total_bill = 0.0
"#
        .to_string()
    }
}

/// Reject negative or non-finite totals.
pub fn validate_total(total: f64) -> Result<f64, ApplicationError> {
    if total.is_finite() && total >= 0.0 {
        Ok(total)
    } else {
        Err(ApplicationError::Config {
            message: format!("total_bill must be a non-negative number, got {total}"),
        })
    }
}

/// A missing key is "not specified"; any other error is reported.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
