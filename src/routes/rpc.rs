// POST /<object>/<method>: decode arguments, run the dispatcher, reply with its document

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::{Value, json};

use super::AppState;
use super::http::not_found;
use crate::dispatcher::Method;

pub(super) async fn call_handler(
    State(state): State<AppState>,
    Path((object, method)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    if object != state.config.bus.object {
        return not_found("object not found");
    }
    let Ok(method) = method.parse::<Method>() else {
        return not_found("method not found");
    };
    let args = decode_args(&body);

    let dispatcher = state.dispatcher.clone();
    let result = tokio::task::spawn_blocking(move || {
        // Sections are replaced whole; the state behind a poisoned lock is consistent.
        let mut dispatcher = dispatcher.lock().unwrap_or_else(|poisoned| {
            tracing::warn!(method = %method, "recovering dispatcher after a panicked call");
            poisoned.into_inner()
        });
        dispatcher.call(method, &args)
    })
    .await
    .map_err(|e| anyhow::anyhow!("dispatch task join: {}", e));

    match result {
        Ok(reply) => Json(Value::Object(reply)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, method = %method, "call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// An empty or unparsable body means "no arguments"; the method decides
/// whether that is an error.
fn decode_args(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "ignoring malformed arguments");
        Value::Null
    })
}
