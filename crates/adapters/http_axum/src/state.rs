//! Shared application state for axum handlers.

use std::sync::Arc;

use homegate_app::ports::{DeviceDiscovery, DeviceRepository};
use homegate_app::services::{CommandDispatcher, DeviceService, DiscoveryService};

/// Application state shared across all axum handlers.
///
/// Generic over the device repository and the discovery adapter to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R, D> {
    /// Action dispatch and state queries on live connections.
    pub dispatcher: Arc<CommandDispatcher>,
    /// Saved-device CRUD service.
    pub device_service: Arc<DeviceService<R>>,
    /// Network scans.
    pub discovery_service: Arc<DiscoveryService<D>>,
}

impl<R, D> Clone for AppState<R, D> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            device_service: Arc::clone(&self.device_service),
            discovery_service: Arc::clone(&self.discovery_service),
        }
    }
}

impl<R, D> AppState<R, D>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        dispatcher: CommandDispatcher,
        device_service: DeviceService<R>,
        discovery_service: DiscoveryService<D>,
    ) -> Self {
        Self::from_arcs(
            Arc::new(dispatcher),
            Arc::new(device_service),
            Arc::new(discovery_service),
        )
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when services need to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(
        dispatcher: Arc<CommandDispatcher>,
        device_service: Arc<DeviceService<R>>,
        discovery_service: Arc<DiscoveryService<D>>,
    ) -> Self {
        Self {
            dispatcher,
            device_service,
            discovery_service,
        }
    }
}
