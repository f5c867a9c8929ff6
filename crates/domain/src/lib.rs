//! # homegate-domain
//!
//! Pure domain model for the homegate smart-home gateway.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error taxonomy, timestamps
//! - Define **descriptors** (what discovery reports about a network device)
//! - Define **device models**: the typed state of each device kind and the
//!   immutable **capability table** validating and applying its actions
//! - Define **device records** (devices the user added, with their names)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod args;
pub mod capability;
pub mod device;
pub mod model;
pub mod record;
