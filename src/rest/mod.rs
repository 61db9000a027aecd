// rest/mod.rs — Public HTTP API server.
//
// Axum server exposing the task CRUD surface plus a health probe.
//
// Endpoints:
//   GET    /api/tasks
//   GET    /api/tasks/{id}
//   POST   /api/tasks
//   PATCH  /api/tasks/{id}
//   DELETE /api/tasks/{id}
//   GET    /health
//
// Any other method on the task routes answers HTTP 400 with a plain
// text body, matching the service's text-based contract.

pub mod routes;

use anyhow::Result;
use axum::{
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("task API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health probe
        .route("/health", get(routes::health::health))
        // Task CRUD — both routes dispatch on method themselves so that
        // non-CRUD methods get the contract's 400 text, not a bare 405.
        .route("/api/tasks", any(routes::tasks::collection))
        .route("/api/tasks/{id}", any(routes::tasks::item))
        .with_state(ctx)
}
