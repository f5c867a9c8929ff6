//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homegate.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use homegate_app::latency::SimulatedLatency;
use homegate_app::registry::CapabilityRegistry;
use homegate_domain::device::DeviceType;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Saved-device storage settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Device connection settings.
    pub devices: DevicesConfig,
    /// Network discovery settings.
    pub discovery: DiscoveryConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Flat-file storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `db.json`.
    pub data_dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Device connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    /// Simulated round trip applied to every committed action.
    pub latency_ms: u64,
    /// Device kinds a controller is available for.
    pub enabled_types: Vec<DeviceType>,
}

/// Discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Duration of one simulated network scan.
    pub scan_delay_ms: u64,
}

impl Config {
    /// Load configuration from `homegate.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homegate.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("HOMEGATE_HOST") {
            self.server.host = val;
        }
        for key in ["PORT", "HOMEGATE_PORT"] {
            if let Some(port) = lookup(key).and_then(|val| val.parse().ok()) {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("HOMEGATE_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("HOMEGATE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(ms) = lookup("HOMEGATE_DEVICE_LATENCY_MS").and_then(|val| val.parse().ok()) {
            self.devices.latency_ms = ms;
        }
        if let Some(ms) = lookup("HOMEGATE_SCAN_DELAY_MS").and_then(|val| val.parse().ok()) {
            self.discovery.scan_delay_ms = ms;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage data_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn latency(&self) -> SimulatedLatency {
        SimulatedLatency::new(Duration::from_millis(self.devices.latency_ms))
    }

    #[must_use]
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.discovery.scan_delay_ms)
    }

    /// The enabled device kinds as a capability registry.
    #[must_use]
    pub fn capabilities(&self) -> CapabilityRegistry {
        CapabilityRegistry::new(self.devices.enabled_types.iter().copied())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homegated=info,homegate=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            enabled_types: DeviceType::ALL.to_vec(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scan_delay_ms: 5000,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
