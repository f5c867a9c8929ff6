//! Discovery service — refreshes the connection catalog from a network scan.

use std::sync::Arc;

use homegate_domain::device::NetworkDeviceDescriptor;
use homegate_domain::error::GatewayError;

use crate::ports::DeviceDiscovery;
use crate::registry::ConnectionRegistry;

/// Runs discovery scans and publishes their results to the registry.
pub struct DiscoveryService<D> {
    discovery: D,
    registry: Arc<ConnectionRegistry>,
}

impl<D: DeviceDiscovery> DiscoveryService<D> {
    pub fn new(discovery: D, registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            discovery,
            registry,
        }
    }

    /// Scan the network, replace the registry's catalog with the result and
    /// return the devices found.
    ///
    /// The catalog is left untouched when the scan fails.
    ///
    /// # Errors
    ///
    /// Returns the error of the discovery adapter.
    #[tracing::instrument(skip(self))]
    pub async fn scan(&self) -> Result<Vec<NetworkDeviceDescriptor>, GatewayError> {
        let descriptors = self.discovery.discover().await?;
        self.registry.update_catalog(descriptors.iter().cloned());
        tracing::info!(count = descriptors.len(), "discovery scan completed");
        Ok(descriptors)
    }
}
