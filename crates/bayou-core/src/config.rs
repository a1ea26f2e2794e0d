//! Configuration loading and typed config structures for Cyber Bayou.
//!
//! The canonical configuration lives in `bayou-config.yaml` at the project
//! root. Every section and every field is optional; anything missing falls
//! back to the launch values below, so an empty file is a valid config.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `bayou-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BayouConfig {
    /// FuX amounts for every reward and penalty.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Ledger retention.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Flavor-text oracle settings.
    #[serde(default)]
    pub oracle: OracleConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Randomness settings.
    #[serde(default)]
    pub rng: RngConfig,
}

impl BayouConfig {
    /// Load configuration from a YAML file on disk.
    ///
    /// After parsing, `BAYOU_HOST` and `BAYOU_PORT` override the listener
    /// address when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as a unit, not an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// FuX amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// FuX credited per venue tier on every check-in.
    #[serde(default = "default_venue_reward_per_tier")]
    pub venue_reward_per_tier: u64,

    /// FuX credited by a hidden cache.
    #[serde(default = "default_hidden_cache_reward")]
    pub hidden_cache_reward: u64,

    /// FuX a curse tries to drain.
    #[serde(default = "default_curse_penalty")]
    pub curse_penalty: u64,

    /// Payout per winning slot row, as a multiple of the bet.
    #[serde(default = "default_slot_line_multiplier")]
    pub slot_line_multiplier: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            venue_reward_per_tier: default_venue_reward_per_tier(),
            hidden_cache_reward: default_hidden_cache_reward(),
            curse_penalty: default_curse_penalty(),
            slot_line_multiplier: default_slot_line_multiplier(),
        }
    }
}

/// Ledger retention settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    /// Newest entries kept per player; older ones fold into the opening
    /// balance.
    #[serde(default = "default_ledger_max_entries")]
    pub max_entries: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_entries: default_ledger_max_entries(),
        }
    }
}

/// Flavor-text oracle settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OracleConfig {
    /// How long a spin waits for flavor text before using the fallback.
    #[serde(default = "default_oracle_timeout_ms")]
    pub timeout_ms: u64,

    /// Message used when the oracle fails, times out, or returns nothing.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_oracle_timeout_ms(),
            fallback_message: default_fallback_message(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl HttpConfig {
    /// Override the listener address with environment variables when set.
    ///
    /// An unparseable `BAYOU_PORT` is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BAYOU_HOST") {
            self.host = val;
        }
        if let Some(port) = std::env::var("BAYOU_PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
        {
            self.port = port;
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Randomness settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RngConfig {
    /// Fixed seed for reproducible draws. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_venue_reward_per_tier() -> u64 {
    50
}

const fn default_hidden_cache_reward() -> u64 {
    100
}

const fn default_curse_penalty() -> u64 {
    50
}

const fn default_slot_line_multiplier() -> u64 {
    10
}

const fn default_ledger_max_entries() -> usize {
    1000
}

const fn default_oracle_timeout_ms() -> u64 {
    3000
}

fn default_fallback_message() -> String {
    "The reels settle in the neon haze.".to_owned()
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}
