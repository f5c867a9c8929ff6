//! Discovery port — scans the network for controllable devices.

use std::future::Future;

use homegate_domain::device::NetworkDeviceDescriptor;
use homegate_domain::error::GatewayError;

/// Finds devices on the network.
///
/// A scan is finite and may take several seconds; callers treat it as a
/// suspending call and never restart it midway.
pub trait DeviceDiscovery {
    /// Run one full scan and return every device found.
    fn discover(
        &self,
    ) -> impl Future<Output = Result<Vec<NetworkDeviceDescriptor>, GatewayError>> + Send;
}

impl<T: DeviceDiscovery + Send + Sync> DeviceDiscovery for std::sync::Arc<T> {
    fn discover(
        &self,
    ) -> impl Future<Output = Result<Vec<NetworkDeviceDescriptor>, GatewayError>> + Send {
        (**self).discover()
    }
}
