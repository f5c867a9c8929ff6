//! # homegate-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** under `/api/v1`:
//!   discovery (`/devices/discover`), saved devices (`/devices`) and device
//!   actions (`/actions/get-status/{uuid}`, `/actions/perform/{uuid}`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into JSON responses, and failures into
//!   `{reason, message, details}` bodies
//!
//! ## Dependency rule
//! Depends on `homegate-app` (for port traits and services) and `homegate-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
