//! JSON REST handlers for discovered and saved devices.

use std::net::IpAddr;
use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use homegate_app::ports::{DeviceDiscovery, DeviceRepository};
use homegate_domain::device::{DeviceType, DiscoveredDevice, NetworkDeviceDescriptor};
use homegate_domain::error::{GatewayError, ValidationError};
use homegate_domain::id::DeviceId;
use homegate_domain::record::DeviceRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for saving a discovered device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDeviceRequest {
    pub name: String,
    pub uuid: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip: String,
    #[serde(rename = "servicePort")]
    pub service_port: i64,
}

impl AddDeviceRequest {
    fn descriptor(&self) -> Result<NetworkDeviceDescriptor, ValidationError> {
        let id = DeviceId::from_str(&self.uuid)
            .map_err(|_| ValidationError::MalformedIdentifier(self.uuid.clone()))?;
        let device_type = DeviceType::from_str(&self.device_type)
            .map_err(|_| ValidationError::InvalidDeviceType(self.device_type.clone()))?;
        IpAddr::from_str(&self.ip).map_err(|_| ValidationError::InvalidAddress(self.ip.clone()))?;
        let port = u16::try_from(self.service_port).map_err(|_| ValidationError::InvalidPort)?;
        Ok(NetworkDeviceDescriptor::new(id, device_type, self.ip.clone(), port))
    }
}

/// Confirmation returned by the mutating endpoints.
#[derive(Debug, Serialize)]
pub struct DeviceChange {
    pub message: &'static str,
    pub device: DeviceRecord,
}

/// Possible responses from the discover endpoint.
pub enum DiscoverResponse {
    Ok(Json<Vec<DiscoveredDevice>>),
}

impl IntoResponse for DiscoverResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<DeviceRecord>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoints.
pub enum GetResponse {
    Ok(Json<DeviceRecord>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<DeviceChange>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok(Json<DeviceChange>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(raw).map_err(|_| {
        ApiError::from(GatewayError::from(ValidationError::MalformedIdentifier(
            raw.to_string(),
        )))
    })
}

/// `GET /api/v1/devices/discover`
pub async fn discover<R, D>(
    State(state): State<AppState<R, D>>,
) -> Result<DiscoverResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let found = state.discovery_service.scan().await?;
    let annotated = state.device_service.annotate(found).await?;
    Ok(DiscoverResponse::Ok(Json(annotated)))
}

/// `GET /api/v1/devices`
pub async fn list<R, D>(State(state): State<AppState<R, D>>) -> Result<ListResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/v1/devices/:uuid`
pub async fn get<R, D>(
    State(state): State<AppState<R, D>>,
    Path(uuid): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let id = parse_id(&uuid)?;
    let device = state.device_service.get_device(id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `GET /api/v1/devices/by-name/:name`
pub async fn get_by_name<R, D>(
    State(state): State<AppState<R, D>>,
    Path(name): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let device = state.device_service.find_by_name(&name).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /api/v1/devices`
pub async fn create<R, D>(
    State(state): State<AppState<R, D>>,
    body: Result<Json<AddDeviceRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let Json(req) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let details = serde_json::to_value(&req).ok();
    let with_details = |err: ApiError| match details.clone() {
        Some(details) => err.with_details(details),
        None => err,
    };

    let descriptor = req
        .descriptor()
        .map_err(|err| with_details(GatewayError::from(err).into()))?;
    let device = state
        .device_service
        .add_device(req.name, descriptor)
        .await
        .map_err(|err| with_details(err.into()))?;
    Ok(CreateResponse::Created(Json(DeviceChange {
        message: "Device added successfully",
        device,
    })))
}

/// `DELETE /api/v1/devices/:uuid`
pub async fn delete<R, D>(
    State(state): State<AppState<R, D>>,
    Path(uuid): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    let id = parse_id(&uuid)?;
    let device = state.device_service.remove_device(id).await?;
    Ok(DeleteResponse::Ok(Json(DeviceChange {
        message: "Device removed successfully",
        device,
    })))
}
