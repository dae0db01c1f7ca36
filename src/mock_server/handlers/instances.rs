//! Instance endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{error_response, instance_not_found, unauthorized};
use crate::mock_server::state::MockState;
use crate::{ConnectionStatus, Instance, QrCode};

/// Body of `POST /instance/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceBody {
    #[serde(default)]
    pub instance_name: String,
    pub token: Option<String>,
    pub number: Option<String>,
    #[serde(default)]
    pub qrcode: bool,
    pub integration: Option<String>,
    #[serde(rename = "reject_call", default)]
    pub reject_call: bool,
    pub msg_call: Option<String>,
    #[serde(default)]
    pub groups_ignore: bool,
    #[serde(default)]
    pub always_online: bool,
    #[serde(default)]
    pub read_messages: bool,
    #[serde(default)]
    pub read_status: bool,
    #[serde(default)]
    pub sync_full_history: bool,
}

/// GET /instance/fetchInstances
pub async fn fetch_instances(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if !state.is_authorized(&headers, None) {
        return unauthorized();
    }

    let instances: Vec<Instance> = state.list_instances().into_iter().cloned().collect();
    (StatusCode::OK, Json(instances)).into_response()
}

/// POST /instance/create
pub async fn create_instance(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<CreateInstanceBody>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_authorized(&headers, None) {
        return unauthorized();
    }

    if body.instance_name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "instanceName is required");
    }

    let name = body.instance_name.clone();
    let instance = Instance {
        name: body.instance_name,
        connection_status: Some(if body.qrcode {
            ConnectionStatus::Connecting
        } else {
            ConnectionStatus::Close
        }),
        integration: Some(
            body.integration
                .unwrap_or_else(|| "WHATSAPP-BAILEYS".to_string()),
        ),
        number: body.number,
        token: body.token,
        qrcode: body.qrcode,
        reject_call: body.reject_call,
        msg_call: body.msg_call,
        groups_ignore: body.groups_ignore,
        always_online: body.always_online,
        read_messages: body.read_messages,
        read_status: body.read_status,
        sync_full_history: body.sync_full_history,
        ..Default::default()
    };

    match state.insert_instance(instance) {
        Some(created) => (StatusCode::CREATED, Json(created.clone())).into_response(),
        None => error_response(
            StatusCode::CONFLICT,
            format!("This name \"{name}\" is already in use."),
        ),
    }
}

/// DELETE /instance/delete/{name}
pub async fn delete_instance(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if !state.is_authorized(&headers, Some(&name)) {
        return unauthorized();
    }

    match state.remove_instance(&name) {
        Some(instance) => (StatusCode::OK, Json(instance)).into_response(),
        None => instance_not_found(&name),
    }
}

/// DELETE /instance/logout/{name}
pub async fn logout_instance(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    set_status(state, name, headers, ConnectionStatus::Close).await
}

/// PUT /instance/restart/{name}
pub async fn restart_instance(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    set_status(state, name, headers, ConnectionStatus::Connecting).await
}

async fn set_status(
    state: Arc<RwLock<MockState>>,
    name: String,
    headers: HeaderMap,
    status: ConnectionStatus,
) -> Response {
    let mut state = state.write().await;
    if !state.is_authorized(&headers, Some(&name)) {
        return unauthorized();
    }

    match state.set_status(&name, status) {
        Some(instance) => (StatusCode::OK, Json(instance.clone())).into_response(),
        None => instance_not_found(&name),
    }
}

/// GET /instance/connectionState/{name}
pub async fn connection_state(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if !state.is_authorized(&headers, Some(&name)) {
        return unauthorized();
    }

    match state.get_instance(&name) {
        Some(instance) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "instanceName": instance.name,
                "state": instance.connection_status.unwrap_or(ConnectionStatus::Close),
            })),
        )
            .into_response(),
        None => instance_not_found(&name),
    }
}

/// GET /instance/connect/{name}
pub async fn connect_instance(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if !state.is_authorized(&headers, Some(&name)) {
        return unauthorized();
    }

    let Some(instance) = state.get_instance(&name) else {
        return instance_not_found(&name);
    };

    if instance.is_open() {
        return (StatusCode::OK, Json(QrCode::default())).into_response();
    }

    let pairing_code = instance.number.as_ref().map(|_| "MOCKPAIR".to_string());
    state.set_status(&name, ConnectionStatus::Connecting);
    let count = state.next_qr_count(&name);

    let qr = QrCode {
        pairing_code,
        code: Some(format!("2@mock-{name}-{count}")),
        base64: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
        count: Some(count),
    };
    (StatusCode::OK, Json(qr)).into_response()
}
