//! Device service — use-cases for the user's saved devices.

use homegate_domain::device::{DiscoveredDevice, NetworkDeviceDescriptor};
use homegate_domain::error::{CatalogError, GatewayError};
use homegate_domain::id::DeviceId;
use homegate_domain::record::DeviceRecord;

use crate::ports::DeviceRepository;

/// Application service over the saved-device repository.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every saved device.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, GatewayError> {
        self.repo.get_all().await
    }

    /// Look up a saved device by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the device was never added,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<DeviceRecord, GatewayError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id.to_string()))
    }

    /// Look up a saved device by its user-given name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no device carries `name`, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<DeviceRecord, GatewayError> {
        self.repo
            .get_by_name(name)
            .await?
            .ok_or_else(|| not_found(name.to_string()))
    }

    /// Whether the device with `id` has been added.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn is_added(&self, id: DeviceId) -> Result<bool, GatewayError> {
        Ok(self.repo.get_by_id(id).await?.is_some())
    }

    /// Save a discovered device under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the name or port is invalid,
    /// [`CatalogError::DeviceAlreadyAdded`] or
    /// [`CatalogError::DuplicateDeviceName`] on conflict, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id))]
    pub async fn add_device(
        &self,
        name: String,
        device: NetworkDeviceDescriptor,
    ) -> Result<DeviceRecord, GatewayError> {
        let record = DeviceRecord::new(name, device)?;
        let record = self.repo.add(record).await?;
        tracing::info!(name = %record.name, "device added");
        Ok(record)
    }

    /// Forget a saved device, returning its record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the device was never added, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn remove_device(&self, id: DeviceId) -> Result<DeviceRecord, GatewayError> {
        let record = self
            .repo
            .remove(id)
            .await?
            .ok_or_else(|| not_found(id.to_string()))?;
        tracing::info!(name = %record.name, "device removed");
        Ok(record)
    }

    /// Pair each discovered device with whether it has been added.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn annotate(
        &self,
        descriptors: Vec<NetworkDeviceDescriptor>,
    ) -> Result<Vec<DiscoveredDevice>, GatewayError> {
        let saved = self.repo.get_all().await?;
        Ok(descriptors
            .into_iter()
            .map(|descriptor| {
                let is_added = saved.iter().any(|r| r.id() == descriptor.id);
                DiscoveredDevice {
                    descriptor,
                    is_added,
                }
            })
            .collect())
    }
}

fn not_found(key: String) -> GatewayError {
    CatalogError::NotFound {
        entity: "Device",
        key,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use homegate_domain::device::DeviceType;
    use homegate_domain::error::ValidationError;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryDeviceRepo {
        store: Mutex<Vec<DeviceRecord>>,
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn add(
            &self,
            record: DeviceRecord,
        ) -> impl Future<Output = Result<DeviceRecord, GatewayError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result: Result<DeviceRecord, GatewayError> = if store
                .iter()
                .any(|r| r.id() == record.id())
            {
                Err(CatalogError::DeviceAlreadyAdded {
                    id: record.id().to_string(),
                }
                .into())
            } else if store.iter().any(|r| r.name == record.name) {
                Err(CatalogError::DuplicateDeviceName {
                    name: record.name.clone(),
                }
                .into())
            } else {
                store.push(record.clone());
                Ok(record)
            };
            async { result }
        }

        fn get_by_id(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|r| r.id() == id).cloned();
            async { Ok(result) }
        }

        fn get_by_name(
            &self,
            name: &str,
        ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|r| r.name == name).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceRecord>, GatewayError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.clone();
            async { Ok(result) }
        }

        fn remove(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<DeviceRecord>, GatewayError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = store
                .iter()
                .position(|r| r.id() == id)
                .map(|index| store.remove(index));
            async { Ok(result) }
        }
    }

    fn make_service() -> DeviceService<InMemoryDeviceRepo> {
        DeviceService::new(InMemoryDeviceRepo::default())
    }

    fn light() -> NetworkDeviceDescriptor {
        NetworkDeviceDescriptor::new(DeviceId::new(), DeviceType::Light, "192.168.1.36", 3001)
    }

    #[tokio::test]
    async fn should_add_device_when_valid() {
        let svc = make_service();
        let device = light();
        let record = svc.add_device("Kitchen Light".to_string(), device.clone()).await.unwrap();
        assert_eq!(record.device, device);
        assert!(svc.is_added(device.id).await.unwrap());
    }

    #[tokio::test]
    async fn should_reject_invalid_name() {
        let svc = make_service();
        let result = svc.add_device("ab".to_string(), light()).await;
        assert!(matches!(
            result,
            Err(GatewayError::Validation(ValidationError::NameLength { .. }))
        ));
        assert!(svc.list_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_device_added_twice() {
        let svc = make_service();
        let device = light();
        svc.add_device("Desk Lamp".to_string(), device.clone()).await.unwrap();
        let result = svc.add_device("Other Name".to_string(), device).await;
        assert!(matches!(
            result,
            Err(GatewayError::Catalog(CatalogError::DeviceAlreadyAdded { .. }))
        ));
    }

    #[tokio::test]
    async fn should_reject_duplicate_name() {
        let svc = make_service();
        svc.add_device("Desk Lamp".to_string(), light()).await.unwrap();
        let result = svc.add_device("Desk Lamp".to_string(), light()).await;
        assert!(matches!(
            result,
            Err(GatewayError::Catalog(CatalogError::DuplicateDeviceName { .. }))
        ));
    }

    #[tokio::test]
    async fn should_find_device_by_name() {
        let svc = make_service();
        let device = light();
        svc.add_device("Mom's Lamp".to_string(), device.clone()).await.unwrap();
        assert_eq!(svc.find_by_name("Mom's Lamp").await.unwrap().id(), device.id);
        assert!(matches!(
            svc.find_by_name("Nobody's Lamp").await,
            Err(GatewayError::Catalog(CatalogError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_device() {
        let svc = make_service();
        assert!(matches!(
            svc.get_device(DeviceId::new()).await,
            Err(GatewayError::Catalog(CatalogError::NotFound { entity: "Device", .. }))
        ));
    }

    #[tokio::test]
    async fn should_remove_device_and_return_record() {
        let svc = make_service();
        let device = light();
        svc.add_device("Hall Light".to_string(), device.clone()).await.unwrap();
        let removed = svc.remove_device(device.id).await.unwrap();
        assert_eq!(removed.name, "Hall Light");
        assert!(!svc.is_added(device.id).await.unwrap());
        assert!(matches!(
            svc.remove_device(device.id).await,
            Err(GatewayError::Catalog(CatalogError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn should_annotate_discovered_devices() {
        let svc = make_service();
        let added = light();
        let fresh = light();
        svc.add_device("Porch Light".to_string(), added.clone()).await.unwrap();
        let annotated = svc.annotate(vec![added.clone(), fresh.clone()]).await.unwrap();
        assert_eq!(annotated.len(), 2);
        assert!(annotated[0].is_added);
        assert_eq!(annotated[0].descriptor, added);
        assert!(!annotated[1].is_added);
        assert_eq!(annotated[1].descriptor, fresh);
    }
}
