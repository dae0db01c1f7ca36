//! Message endpoint handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{error_response, instance_not_found, unauthorized};
use crate::mock_server::state::{MockState, RecordedMessage};
use crate::{MessageKey, SentMessage};

/// POST /message/{kind}/{instance}
///
/// Accepts JSON or multipart bodies for any `send*` kind and records them.
pub async fn send_message(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((kind, instance)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;
    if !state.is_authorized(&headers, Some(&instance)) {
        return unauthorized();
    }

    if !kind.starts_with("send") {
        return error_response(StatusCode::NOT_FOUND, format!("Cannot POST /message/{kind}"));
    }

    if state.get_instance(&instance).is_none() {
        return instance_not_found(&instance);
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let json = if content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/json"))
    {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        }
    } else {
        None
    };

    let number = json
        .as_ref()
        .and_then(|v| v.get("number"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let id = state.record_message(RecordedMessage {
        instance,
        kind: kind.clone(),
        content_type,
        json,
        raw: body.to_vec(),
    });

    let sent = SentMessage {
        key: Some(MessageKey::new(
            format!("{number}@s.whatsapp.net"),
            true,
            id,
        )),
        status: Some("PENDING".to_string()),
        message_type: Some(kind.trim_start_matches("send").to_string()),
        message_timestamp: Some(Value::from(chrono::Utc::now().timestamp())),
        ..Default::default()
    };
    (StatusCode::CREATED, Json(sent)).into_response()
}
