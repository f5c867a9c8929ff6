//! Common error types used across the workspace.
//!
//! Each concern owns a typed error enum; [`GatewayError`] aggregates them via
//! `#[from]` so every layer can propagate with `?` without flattening the
//! classification.

use std::fmt;

use crate::device::DeviceType;

/// Top-level error returned by the gateway's use-cases.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing or malformed caller input, detected before any resolution.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A device rejected an action.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// A device identifier could not be resolved to a live connection.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The persisted device catalog refused an operation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The persistence collaborator failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The discovery collaborator failed.
    #[error("discovery error")]
    Discovery(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Caller input that fails a structural check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("device identifier not provided")]
    MissingIdentifier,

    #[error("action not provided")]
    MissingAction,

    #[error("device identifier {0:?} is not a valid UUID")]
    MalformedIdentifier(String),

    #[error("name must be between {min} and {max} characters")]
    NameLength { min: usize, max: usize },

    #[error("name can only contain letters, numbers, spaces and apostrophe (')")]
    NameCharacters,

    #[error("service port must be between 1 and 65535")]
    InvalidPort,

    #[error("device type must be one of [AC, TV, Light], got {0:?}")]
    InvalidDeviceType(String),

    #[error("{0:?} is not a valid IP address")]
    InvalidAddress(String),
}

/// A device rejected an action; its state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Value out of range. Value must be {min} <= value <= {max}")]
    OutOfRange { min: i64, max: i64 },

    #[error("Invalid value. Value must be any of [{}]", allowed.join(", "))]
    InvalidArgument { allowed: Vec<String> },

    #[error("Invalid format of value. Format must be any of [{}]", formats.join(", "))]
    ArgumentFormat { formats: Vec<String> },

    #[error("action {action:?} is not supported by this device")]
    UnknownAction { action: String },
}

impl ActionError {
    /// Build an [`ActionError::InvalidArgument`] listing every accepted value.
    #[must_use]
    pub fn invalid_argument<T: fmt::Display>(allowed: &[T]) -> Self {
        Self::InvalidArgument {
            allowed: allowed.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Resolution of a device identifier failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("network device {id} not found")]
    DeviceNotFound { id: String },

    #[error("no controller available for device type {device_type}")]
    UnknownDeviceType { device_type: DeviceType },
}

/// The persisted device catalog refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("device is already added")]
    DeviceAlreadyAdded { id: String },

    #[error("device name {name:?} is already in use")]
    DuplicateDeviceName { name: String },

    #[error("{entity} {key} is not added to the database yet")]
    NotFound { entity: &'static str, key: String },
}
