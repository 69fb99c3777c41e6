// GET handlers: version, object listing

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

use super::AppState;
use crate::dispatcher::Method;
use crate::version::{NAME, VERSION};

/// GET /version: agent name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /<object>: registered methods and their argument types.
pub(super) async fn list_handler(
    State(state): State<AppState>,
    Path(object): Path<String>,
) -> Response {
    if object != state.config.bus.object {
        return not_found("object not found");
    }
    let methods: Map<String, Value> = Method::ALL
        .into_iter()
        .map(|method| {
            let args: Map<String, Value> = method
                .arguments()
                .iter()
                .map(|name| (name.to_string(), Value::from("int32")))
                .collect();
            (method.name().to_string(), Value::Object(args))
        })
        .collect();
    let mut listing = Map::new();
    listing.insert(object, Value::Object(methods));
    Json(Value::Object(listing)).into_response()
}

pub(super) fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}
