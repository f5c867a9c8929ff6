//! Network device descriptors produced by discovery.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// The closed set of device kinds the gateway knows how to control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "AC")]
    Ac,
    #[serde(rename = "TV")]
    Tv,
    Light,
}

impl DeviceType {
    /// Every known device type.
    pub const ALL: [Self; 3] = [Self::Ac, Self::Tv, Self::Light];

    /// Wire tag (`"AC"`, `"TV"`, `"Light"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Tv => "TV",
            Self::Light => "Light",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type tag is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device type {0:?}")]
pub struct UnknownTypeTag(pub String);

impl FromStr for DeviceType {
    type Err = UnknownTypeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTypeTag(s.to_string()))
    }
}

/// Immutable record describing a device found on the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDeviceDescriptor {
    #[serde(rename = "uuid")]
    pub id: DeviceId,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(rename = "ip")]
    pub address: String,
    #[serde(rename = "servicePort")]
    pub port: u16,
}

impl NetworkDeviceDescriptor {
    #[must_use]
    pub fn new(id: DeviceId, device_type: DeviceType, address: impl Into<String>, port: u16) -> Self {
        Self {
            id,
            device_type,
            address: address.into(),
            port,
        }
    }
}

/// A descriptor annotated with whether the user already added the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    #[serde(flatten)]
    pub descriptor: NetworkDeviceDescriptor,
    #[serde(rename = "isAdded")]
    pub is_added: bool,
}
