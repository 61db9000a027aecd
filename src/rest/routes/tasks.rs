// rest/routes/tasks.rs — Task CRUD routes.
//
// Both task routes feed one dispatch function; a request on the
// collection path carries the empty id. Responses reproduce the
// service's plain-text contract: JSON bodies are returned as strings,
// lookup misses answer 200 with a sentinel body, and only a non-CRUD
// method or a storage failure changes the status code.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::store::{StoreError, Task};
use crate::AppContext;

/// Body returned when a lookup, replace, or delete matches no task.
pub const ID_NOT_FOUND: &str = "400 - ID not found";
/// Body returned (with HTTP 400) for any method outside the CRUD set.
pub const UNSUITABLE_METHOD: &str = "400 - Unsuitable method requested";
/// Body returned (with HTTP 500) when the collection cannot be persisted.
pub const STORAGE_FAILURE: &str = "500 - Storage failure";
/// Body returned by a successful delete.
pub const DELETE_DONE: &str = "Done";

pub async fn collection(
    State(ctx): State<Arc<AppContext>>,
    method: Method,
    body: String,
) -> (StatusCode, String) {
    dispatch(&ctx, method, String::new(), body).await
}

pub async fn item(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    method: Method,
    body: String,
) -> (StatusCode, String) {
    dispatch(&ctx, method, id, body).await
}

async fn dispatch(
    ctx: &AppContext,
    method: Method,
    id: String,
    body: String,
) -> (StatusCode, String) {
    info!(method = %method, id = %id, "handling task request");

    match method.as_str() {
        "GET" => {
            if id.is_empty() {
                encode(&ctx.store.list().await)
            } else {
                match ctx.store.get(&id).await {
                    Some(task) => encode(&task),
                    None => (StatusCode::OK, ID_NOT_FOUND.to_string()),
                }
            }
        }
        "POST" => match ctx.store.create(decode_task(&body)).await {
            // Echo the submitted body verbatim, not the decoded form.
            Ok(()) => (StatusCode::OK, body),
            Err(e) => storage_failure(e),
        },
        "PATCH" => match ctx.store.replace(&id, decode_task(&body)).await {
            Ok(true) => (StatusCode::OK, body),
            Ok(false) => (StatusCode::OK, ID_NOT_FOUND.to_string()),
            Err(e) => storage_failure(e),
        },
        "DELETE" => match ctx.store.delete(&id).await {
            Ok(true) => (StatusCode::OK, DELETE_DONE.to_string()),
            Ok(false) => (StatusCode::OK, ID_NOT_FOUND.to_string()),
            Err(e) => storage_failure(e),
        },
        other => {
            warn!(method = %other, "unsuitable method requested");
            (StatusCode::BAD_REQUEST, UNSUITABLE_METHOD.to_string())
        }
    }
}

/// Decode a task payload the way the contract demands: missing fields
/// default to empty strings, and a body that is not valid JSON becomes
/// a blank task rather than an error.
fn decode_task(body: &str) -> Task {
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!(err = %e, "task payload did not decode — storing a blank task");
        Task::default()
    })
}

fn encode<T: serde::Serialize>(value: &T) -> (StatusCode, String) {
    match serde_json::to_string(value) {
        Ok(json) => (StatusCode::OK, json),
        Err(e) => {
            error!(err = %e, "could not encode response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                STORAGE_FAILURE.to_string(),
            )
        }
    }
}

fn storage_failure(e: StoreError) -> (StatusCode, String) {
    error!(err = %e, "task store operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        STORAGE_FAILURE.to_string(),
    )
}
