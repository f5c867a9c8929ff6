//! # homegate-adapter-storage-json
//!
//! Flat-file persistence adapter: the user's saved devices live in a single
//! `db.json` document inside the data directory.
//!
//! ## Responsibilities
//! - Implement the repository port trait defined in `homegate-app::ports::storage`
//! - Create the document on first start and recover from a corrupt one
//! - Enforce identifier and name uniqueness under a single writer
//!
//! ## Dependency rule
//! Depends on `homegate-app` (for port traits) and `homegate-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod device_repo;
mod error;

pub use device_repo::{DATABASE_FILE, JsonFileDeviceRepository};
pub use error::StorageError;
