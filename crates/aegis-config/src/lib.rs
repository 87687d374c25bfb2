// crates/aegis-config/src/lib.rs
// ============================================================================
// Module: Aegis Configuration
// Description: Configuration model, TOML loading, and fail-closed validation.
// Purpose: Define every tunable an Aegis deployment exposes.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from TOML and validated before any server or
//! client component starts. Validation fails closed: a config that parses
//! but carries out-of-range values is rejected with a stable message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted request body size in bytes.
const MAX_BODY_BYTES_LIMIT: usize = 16 * 1024 * 1024;

/// Maximum accepted artificial delivery delay in milliseconds.
const MAX_DELIVERY_DELAY_MS: u64 = 60_000;

/// Maximum accepted shake window in milliseconds.
const MAX_SHAKE_WINDOW_MS: u64 = 60_000;

/// Maximum accepted recording limit in seconds.
const MAX_RECORDING_LIMIT_SECS: u64 = 3_600;

/// Maximum accepted call delay in seconds.
const MAX_CALL_DELAY_SECS: u64 = 3_600;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Messages are stable; tests assert on their content.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("config read failed: {0}")]
    Io(String),
    /// TOML parsing failed.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// A parsed value is out of range or malformed.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Server Configuration
// ============================================================================

/// HTTP server settings.
///
/// # Invariants
/// - `bind` must parse as a socket address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Whether to seed the store with the three sample contacts.
    #[serde(default)]
    pub seed_sample_contacts: bool,
}

/// Default maximum request body size (64 KiB).
const fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            max_body_bytes: default_max_body_bytes(),
            seed_sample_contacts: false,
        }
    }
}

// ============================================================================
// SECTION: Delivery Configuration
// ============================================================================

/// Simulated delivery settings.
///
/// # Invariants
/// - Delays are bounded to keep handlers responsive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryConfig {
    /// Artificial delay for the standalone send-sms endpoint, in milliseconds.
    #[serde(default = "default_sms_delay_ms")]
    pub sms_delay_ms: u64,
    /// Artificial delay for trigger-workflow deliveries, in milliseconds.
    #[serde(default = "default_trigger_sms_delay_ms")]
    pub trigger_sms_delay_ms: u64,
}

/// Default standalone SMS delay (1 second).
const fn default_sms_delay_ms() -> u64 {
    1_000
}

/// Default trigger-workflow SMS delay (500 milliseconds).
const fn default_trigger_sms_delay_ms() -> u64 {
    500
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            sms_delay_ms: default_sms_delay_ms(),
            trigger_sms_delay_ms: default_trigger_sms_delay_ms(),
        }
    }
}

impl DeliveryConfig {
    /// Returns the standalone SMS delay as a duration.
    #[must_use]
    pub const fn sms_delay(&self) -> Duration {
        Duration::from_millis(self.sms_delay_ms)
    }

    /// Returns the trigger-workflow SMS delay as a duration.
    #[must_use]
    pub const fn trigger_sms_delay(&self) -> Duration {
        Duration::from_millis(self.trigger_sms_delay_ms)
    }
}

// ============================================================================
// SECTION: Client Configuration
// ============================================================================

/// Client sensor and session tunables.
///
/// # Invariants
/// - All durations and counts are bounded by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Combined-axis acceleration magnitude that qualifies as a shake sample.
    #[serde(default = "default_shake_threshold")]
    pub shake_threshold: f64,
    /// Qualifying samples required to emit a shake event.
    #[serde(default = "default_shake_trigger_count")]
    pub shake_trigger_count: u32,
    /// Inactivity window after which the shake count resets, in milliseconds.
    #[serde(default = "default_shake_window_ms")]
    pub shake_window_ms: u64,
    /// Interval between location refreshes, in seconds.
    #[serde(default = "default_location_interval_secs")]
    pub location_interval_secs: u64,
    /// Timeout for a single position fix, in seconds.
    #[serde(default = "default_location_timeout_secs")]
    pub location_timeout_secs: u64,
    /// Maximum accepted age of a cached position fix, in seconds.
    #[serde(default = "default_location_max_age_secs")]
    pub location_max_age_secs: u64,
    /// Audio recording bound imposed by the alert session, in seconds.
    #[serde(default = "default_recording_limit_secs")]
    pub recording_limit_secs: u64,
    /// Delay between a sent alert and the automatic call, in seconds.
    #[serde(default = "default_call_delay_secs")]
    pub call_delay_secs: u64,
}

/// Default shake qualification threshold.
const fn default_shake_threshold() -> f64 {
    25.0
}

/// Default qualifying-sample count.
const fn default_shake_trigger_count() -> u32 {
    3
}

/// Default shake inactivity window (2 seconds).
const fn default_shake_window_ms() -> u64 {
    2_000
}

/// Default location refresh interval (30 minutes).
const fn default_location_interval_secs() -> u64 {
    1_800
}

/// Default position fix timeout (10 seconds).
const fn default_location_timeout_secs() -> u64 {
    10
}

/// Default maximum cached fix age (5 minutes).
const fn default_location_max_age_secs() -> u64 {
    300
}

/// Default audio recording bound (10 seconds).
const fn default_recording_limit_secs() -> u64 {
    10
}

/// Default automatic-call delay (2 seconds).
const fn default_call_delay_secs() -> u64 {
    2
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            shake_threshold: default_shake_threshold(),
            shake_trigger_count: default_shake_trigger_count(),
            shake_window_ms: default_shake_window_ms(),
            location_interval_secs: default_location_interval_secs(),
            location_timeout_secs: default_location_timeout_secs(),
            location_max_age_secs: default_location_max_age_secs(),
            recording_limit_secs: default_recording_limit_secs(),
            call_delay_secs: default_call_delay_secs(),
        }
    }
}

// ============================================================================
// SECTION: Root Configuration
// ============================================================================

/// Root Aegis configuration.
///
/// # Invariants
/// - `validate` must pass before the config reaches a server or client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AegisConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Simulated delivery settings.
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Client sensor and session tunables.
    #[serde(default)]
    pub client: ClientConfig,
}

impl AegisConfig {
    /// Loads and validates a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::load_from_str(&raw)
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn load_from_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every field against its documented bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] with a stable message on the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("server bind must be a socket address".to_string()))?;
        if self.server.max_body_bytes == 0 || self.server.max_body_bytes > MAX_BODY_BYTES_LIMIT {
            return Err(ConfigError::Invalid("server max_body_bytes out of range".to_string()));
        }
        if self.delivery.sms_delay_ms > MAX_DELIVERY_DELAY_MS {
            return Err(ConfigError::Invalid("delivery sms_delay_ms exceeds limit".to_string()));
        }
        if self.delivery.trigger_sms_delay_ms > MAX_DELIVERY_DELAY_MS {
            return Err(ConfigError::Invalid(
                "delivery trigger_sms_delay_ms exceeds limit".to_string(),
            ));
        }
        if !self.client.shake_threshold.is_finite() || self.client.shake_threshold <= 0.0 {
            return Err(ConfigError::Invalid("client shake_threshold must be positive".to_string()));
        }
        if self.client.shake_trigger_count == 0 {
            return Err(ConfigError::Invalid(
                "client shake_trigger_count must be at least 1".to_string(),
            ));
        }
        if self.client.shake_window_ms == 0 || self.client.shake_window_ms > MAX_SHAKE_WINDOW_MS {
            return Err(ConfigError::Invalid("client shake_window_ms out of range".to_string()));
        }
        if self.client.location_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "client location_interval_secs must be positive".to_string(),
            ));
        }
        if self.client.location_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "client location_timeout_secs must be positive".to_string(),
            ));
        }
        if self.client.recording_limit_secs == 0
            || self.client.recording_limit_secs > MAX_RECORDING_LIMIT_SECS
        {
            return Err(ConfigError::Invalid(
                "client recording_limit_secs out of range".to_string(),
            ));
        }
        if self.client.call_delay_secs > MAX_CALL_DELAY_SECS {
            return Err(ConfigError::Invalid("client call_delay_secs exceeds limit".to_string()));
        }
        Ok(())
    }

    /// Returns the validated bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the bind string does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("server bind must be a socket address".to_string()))
    }
}
