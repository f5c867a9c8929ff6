//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod device_service;
pub mod discovery_service;
pub mod dispatcher;

pub use device_service::DeviceService;
pub use discovery_service::DiscoveryService;
pub use dispatcher::CommandDispatcher;
