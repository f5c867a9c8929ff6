//! JSON REST handlers for device actions and state.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homegate_app::ports::{DeviceDiscovery, DeviceRepository};
use homegate_domain::args::ActionArgs;
use homegate_domain::capability::ActionOutcome;
use homegate_domain::model::DeviceState;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for performing an action.
#[derive(Debug, Default, Deserialize)]
pub struct PerformActionRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub args: ActionArgs,
}

/// Possible responses from the status endpoint.
pub enum StatusResponse {
    Ok(Json<DeviceState>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the perform endpoint.
pub enum PerformResponse {
    Ok(Json<ActionOutcome>),
}

impl IntoResponse for PerformResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/v1/actions/get-status/:uuid`
pub async fn get_status<R, D>(
    State(state): State<AppState<R, D>>,
    Path(uuid): Path<String>,
) -> Result<StatusResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let snapshot = state
        .dispatcher
        .query_state(&uuid)
        .map_err(|err| ApiError::from(err).with_details(serde_json::json!({ "uuid": uuid })))?;
    Ok(StatusResponse::Ok(Json(snapshot)))
}

/// `POST /api/v1/actions/perform/:uuid`
pub async fn perform<R, D>(
    State(state): State<AppState<R, D>>,
    Path(uuid): Path<String>,
    body: Result<Json<PerformActionRequest>, JsonRejection>,
) -> Result<PerformResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let Json(req) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let details = serde_json::json!({
        "uuid": uuid,
        "action": req.action,
        "args": req.args.as_value(),
    });
    let outcome = state
        .dispatcher
        .dispatch(&uuid, &req.action, req.args)
        .await
        .map_err(|err| ApiError::from(err).with_details(details))?;
    Ok(PerformResponse::Ok(Json(outcome)))
}
