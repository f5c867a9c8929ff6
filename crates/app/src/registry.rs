//! Connection registry — one live connection per device identifier.
//!
//! The registry owns two maps:
//! - the **catalog**: the last discovery snapshot, i.e. every device that
//!   may be connected to, keyed by identifier;
//! - the **connections**: every connection established so far. Entries are
//!   never evicted, not even when a later scan no longer reports the device.
//!
//! Which device kinds can be connected at all is decided by the
//! [`CapabilityRegistry`].

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use homegate_domain::device::{DeviceType, NetworkDeviceDescriptor};
use homegate_domain::error::ConnectionError;
use homegate_domain::id::DeviceId;

use crate::connection::Connection;
use crate::latency::SimulatedLatency;

/// The device kinds this gateway has controllers enabled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRegistry {
    enabled: BTreeSet<DeviceType>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new(DeviceType::ALL)
    }
}

impl CapabilityRegistry {
    #[must_use]
    pub fn new(enabled: impl IntoIterator<Item = DeviceType>) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn supports(&self, device_type: DeviceType) -> bool {
        self.enabled.contains(&device_type)
    }

    /// Action names of `device_type`, or `None` when it is not enabled.
    #[must_use]
    pub fn actions(&self, device_type: DeviceType) -> Option<Vec<&'static str>> {
        self.supports(device_type)
            .then(|| homegate_domain::model::actions_for(device_type))
    }

    /// Open a connection to `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownDeviceType`] when the descriptor's
    /// kind is not enabled.
    pub fn connect(
        &self,
        descriptor: &NetworkDeviceDescriptor,
        latency: SimulatedLatency,
    ) -> Result<Connection, ConnectionError> {
        if !self.supports(descriptor.device_type) {
            return Err(ConnectionError::UnknownDeviceType {
                device_type: descriptor.device_type,
            });
        }
        Ok(Connection::open(descriptor.clone(), latency))
    }
}

/// Memoizes one [`Connection`] per device identifier.
#[derive(Debug)]
pub struct ConnectionRegistry {
    capabilities: CapabilityRegistry,
    latency: SimulatedLatency,
    catalog: RwLock<HashMap<DeviceId, NetworkDeviceDescriptor>>,
    connections: Mutex<HashMap<DeviceId, Connection>>,
}

impl ConnectionRegistry {
    /// Create an empty registry. Nothing can be resolved until the catalog
    /// is filled by [`update_catalog`](Self::update_catalog).
    #[must_use]
    pub fn new(capabilities: CapabilityRegistry, latency: SimulatedLatency) -> Self {
        Self {
            capabilities,
            latency,
            catalog: RwLock::new(HashMap::new()),
            connections: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Replace the known-device catalog with a fresh discovery snapshot.
    ///
    /// Live connections are left as they are.
    pub fn update_catalog(&self, descriptors: impl IntoIterator<Item = NetworkDeviceDescriptor>) {
        let fresh: HashMap<_, _> = descriptors.into_iter().map(|d| (d.id, d)).collect();
        let count = fresh.len();
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        tracing::debug!(count, "device catalog updated");
    }

    /// The current catalog, ordered by identifier.
    #[must_use]
    pub fn catalog(&self) -> Vec<NetworkDeviceDescriptor> {
        let mut descriptors: Vec<_> = self
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        descriptors.sort_by_key(|d| d.id);
        descriptors
    }

    /// Number of connections established so far.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.lock_connections().len()
    }

    /// Return the connection for `id`, establishing it on first use.
    ///
    /// Resolution of a never-seen identifier is serialized, so concurrent
    /// callers converge on the same connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::DeviceNotFound`] when `id` is neither
    /// connected nor in the catalog, and
    /// [`ConnectionError::UnknownDeviceType`] when its kind is not enabled.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, id: DeviceId) -> Result<Connection, ConnectionError> {
        let mut connections = self.lock_connections();
        if let Some(connection) = connections.get(&id) {
            return Ok(connection.clone());
        }

        let descriptor = self
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| ConnectionError::DeviceNotFound { id: id.to_string() })?;

        let connection = self.capabilities.connect(&descriptor, self.latency)?;
        connections.insert(id, connection.clone());
        tracing::info!(
            device_type = %descriptor.device_type,
            address = %descriptor.address,
            port = descriptor.port,
            "connection established"
        );
        Ok(connection)
    }

    fn lock_connections(&self) -> MutexGuard<'_, HashMap<DeviceId, Connection>> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
