//! Configuration of the countdown: time zone, milestones, store location.
//!
//! Read from a TOML file; every key is optional.
//!
//! ```toml
//! timezone = "Asia/Tokyo"
//! milestones = [100, 200, 300, 365, 730, 1095]
//! store = "anniversary-store.toml"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use crate::milestone::DEFAULT_MILESTONES;

/// Time zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;
/// Store file used when none is configured.
pub const DEFAULT_STORE: &str = "anniversary-store.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("unknown time zone `{0}`")]
    Timezone(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub timezone: Tz,
    /// Milestone offsets in days, in display order.
    pub milestones: Vec<u32>,
    pub store: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    timezone: Option<String>,
    milestones: Option<Vec<u32>>,
    store: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            milestones: DEFAULT_MILESTONES.to_vec(),
            store: PathBuf::from(DEFAULT_STORE),
        }
    }
}

impl Config {
    /// Loads the configuration at `path`. A missing file yields the defaults.
    ///
    /// A relative `store` path, including the default one, is resolved
    /// against the directory of `path`, so the store always sits next to its
    /// config whatever the working directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml(&text)?;
                debug!(path = %path.display(), timezone = %config.timezone, "loaded config");
                config
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        if let Some(dir) = path.parent()
            && config.store.is_relative()
        {
            config.store = dir.join(&config.store);
        }
        Ok(config)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Example
    ///
    /// ```
    /// use anniversary::Config;
    ///
    /// let config = Config::from_toml("timezone = \"Europe/Paris\"\nmilestones = [50, 100]").unwrap();
    /// assert_eq!(chrono_tz::Europe::Paris, config.timezone);
    /// assert_eq!(vec![50, 100], config.milestones);
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            timezone: match raw.timezone {
                Some(name) => parse_timezone(&name)?,
                None => defaults.timezone,
            },
            milestones: raw.milestones.unwrap_or(defaults.milestones),
            store: raw.store.unwrap_or(defaults.store),
        })
    }
}

/// Parses an IANA time zone name such as `Asia/Tokyo`.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse()
        .map_err(|_| ConfigError::Timezone(name.to_owned()))
}
