//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod actions;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::{get, post};

use homegate_app::ports::{DeviceDiscovery, DeviceRepository};

use crate::state::AppState;

/// Build the `/api/v1` sub-router.
pub fn routes<R, D>() -> Router<AppState<R, D>>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    Router::new()
        // Saved devices
        .route("/devices/discover", get(devices::discover::<R, D>))
        .route(
            "/devices",
            get(devices::list::<R, D>).post(devices::create::<R, D>),
        )
        .route("/devices/by-name/{name}", get(devices::get_by_name::<R, D>))
        .route(
            "/devices/{uuid}",
            get(devices::get::<R, D>).delete(devices::delete::<R, D>),
        )
        // Device actions
        .route("/actions/get-status/{uuid}", get(actions::get_status::<R, D>))
        .route("/actions/perform/{uuid}", post(actions::perform::<R, D>))
}
