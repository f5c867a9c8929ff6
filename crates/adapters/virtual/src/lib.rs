//! # homegate-adapter-virtual
//!
//! Virtual/demo discovery that reports a fixed set of simulated devices.
//!
//! ## Provided devices
//!
//! | Type | Addresses | Service port |
//! |------|-----------|--------------|
//! | AC | `192.168.1.33`, `192.168.1.34` | 10203 |
//! | TV | `192.168.1.35` | 80 |
//! | Light | `192.168.1.36` – `192.168.1.39` | 3001 |
//!
//! A scan waits for the configured delay before answering, like a real
//! network sweep would.
//!
//! ## Dependency rule
//!
//! Depends on `homegate-app` (port traits) and `homegate-domain` only.

mod network;

use std::time::Duration;

use homegate_app::ports::DeviceDiscovery;
use homegate_domain::device::NetworkDeviceDescriptor;
use homegate_domain::error::GatewayError;

/// Duration of one simulated network scan.
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_secs(5);

/// Discovery adapter over the simulated network.
#[derive(Debug, Clone)]
pub struct VirtualDiscovery {
    scan_delay: Duration,
}

impl Default for VirtualDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_DELAY)
    }
}

impl VirtualDiscovery {
    #[must_use]
    pub fn new(scan_delay: Duration) -> Self {
        Self { scan_delay }
    }

    #[must_use]
    pub fn scan_delay(&self) -> Duration {
        self.scan_delay
    }
}

impl DeviceDiscovery for VirtualDiscovery {
    async fn discover(&self) -> Result<Vec<NetworkDeviceDescriptor>, GatewayError> {
        tracing::debug!(delay_ms = self.scan_delay.as_millis(), "scanning virtual network");
        if !self.scan_delay.is_zero() {
            tokio::time::sleep(self.scan_delay).await;
        }
        Ok(network::devices())
    }
}
