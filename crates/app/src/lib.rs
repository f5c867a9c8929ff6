//! # homegate-app
//!
//! Application layer — device connections, command dispatch and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceDiscovery` — scan the network for devices
//!   - `DeviceRepository` — persist the user's saved devices
//! - Own the live device state machines:
//!   - `ConnectionRegistry` — one `Connection` per device identifier
//!   - `CapabilityRegistry` — which device kinds have a controller
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CommandDispatcher` — dispatch actions, query state
//!   - `DeviceService` — add, list, get, remove saved devices
//!   - `DiscoveryService` — refresh the catalog from a scan
//!
//! ## Dependency rule
//! Depends on `homegate-domain` only (plus `tokio` for locks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod connection;
pub mod latency;
pub mod ports;
pub mod registry;
pub mod services;
