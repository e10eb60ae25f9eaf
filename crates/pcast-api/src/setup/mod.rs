//! Application setup: database, storage, services and routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use pcast_core::PcastConfig;

use crate::state::AppState;

/// Connect every collaborator and build the router.
pub async fn initialize_app(config: PcastConfig) -> Result<(Arc<AppState>, Router)> {
    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = services::build_state(config, pool, storage);
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
