//! Device record — a discovered device the user chose to keep, under a name.

use serde::{Deserialize, Serialize};

use crate::device::NetworkDeviceDescriptor;
use crate::error::{GatewayError, ValidationError};
use crate::id::DeviceId;
use crate::time::{Timestamp, now};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 30;

/// A user-added device. Unique by identifier and by name within the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    #[serde(rename = "deviceMeta")]
    pub device: NetworkDeviceDescriptor,
    #[serde(rename = "addedAt", default = "now")]
    pub added_at: Timestamp,
}

impl DeviceRecord {
    /// Create a record stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the name or port is invalid.
    pub fn new(name: impl Into<String>, device: NetworkDeviceDescriptor) -> Result<Self, GatewayError> {
        let record = Self {
            name: name.into(),
            device,
            added_at: now(),
        };
        record.validate()?;
        Ok(record)
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.device.id
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name has the wrong length or
    /// contains characters other than letters, digits, spaces and
    /// apostrophes, or when the service port is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let len = self.name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            return Err(ValidationError::NameLength {
                min: NAME_MIN_LEN,
                max: NAME_MAX_LEN,
            });
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '\'')
        {
            return Err(ValidationError::NameCharacters);
        }
        if self.device.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceType;

    fn descriptor(port: u16) -> NetworkDeviceDescriptor {
        NetworkDeviceDescriptor::new(DeviceId::new(), DeviceType::Light, "192.168.1.36", port)
    }

    #[test]
    fn should_build_record_when_name_is_valid() {
        let record = DeviceRecord::new("Kid's Room 2", descriptor(3001)).unwrap();
        assert_eq!(record.name, "Kid's Room 2");
        assert_eq!(record.id(), record.device.id);
    }

    #[test]
    fn should_reject_short_and_long_names() {
        for name in ["ab", &"x".repeat(31)] {
            assert!(matches!(
                DeviceRecord::new(name, descriptor(3001)),
                Err(GatewayError::Validation(ValidationError::NameLength { .. }))
            ));
        }
    }

    #[test]
    fn should_reject_punctuation_in_name() {
        assert!(matches!(
            DeviceRecord::new("Hall-Light", descriptor(3001)),
            Err(GatewayError::Validation(ValidationError::NameCharacters))
        ));
    }

    #[test]
    fn should_reject_zero_port() {
        assert!(matches!(
            DeviceRecord::new("Hall Light", descriptor(0)),
            Err(GatewayError::Validation(ValidationError::InvalidPort))
        ));
    }

    #[test]
    fn should_use_stored_field_names() {
        let record = DeviceRecord::new("Hall Light", descriptor(3001)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Hall Light");
        assert_eq!(json["deviceMeta"]["type"], "Light");
        assert!(json["addedAt"].is_string());
    }

    #[test]
    fn should_default_missing_timestamp_when_loading() {
        let json = r#"{"name":"Hall Light","deviceMeta":{"uuid":"00000000-0000-0000-0000-000000000001","type":"Light","ip":"192.168.1.36","servicePort":3001}}"#;
        let record: DeviceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.device.port, 3001);
    }
}
