//! Storage port — repository of user-added devices.

use std::future::Future;

use homegate_domain::error::GatewayError;
use homegate_domain::id::DeviceId;
use homegate_domain::record::DeviceRecord;

/// Persistence of [`DeviceRecord`]s, unique by identifier and by name.
///
/// Implementations must enforce both uniqueness rules atomically with the
/// insertion, so that two concurrent adds cannot both succeed.
pub trait DeviceRepository {
    /// Insert a new record.
    ///
    /// Fails with [`CatalogError::DeviceAlreadyAdded`] or
    /// [`CatalogError::DuplicateDeviceName`] on conflict.
    ///
    /// [`CatalogError::DeviceAlreadyAdded`]: homegate_domain::error::CatalogError::DeviceAlreadyAdded
    /// [`CatalogError::DuplicateDeviceName`]: homegate_domain::error::CatalogError::DuplicateDeviceName
    fn add(
        &self,
        record: DeviceRecord,
    ) -> impl Future<Output = Result<DeviceRecord, GatewayError>> + Send;

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send;

    /// Every record, in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceRecord>, GatewayError>> + Send;

    /// Remove a record, returning it, or `None` when it was not stored.
    fn remove(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for std::sync::Arc<T> {
    fn add(
        &self,
        record: DeviceRecord,
    ) -> impl Future<Output = Result<DeviceRecord, GatewayError>> + Send {
        (**self).add(record)
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send {
        (**self).get_by_name(name)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceRecord>, GatewayError>> + Send {
        (**self).get_all()
    }

    fn remove(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send {
        (**self).remove(id)
    }
}
