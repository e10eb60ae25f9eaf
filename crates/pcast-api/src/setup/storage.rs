//! Blob storage setup

use std::sync::Arc;

use anyhow::{Context, Result};
use pcast_core::PcastConfig;
use pcast_storage::{create_storage, Storage};

pub async fn setup_storage(config: &PcastConfig) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize attachment storage")?;

    tracing::info!(backend = ?storage.backend_type(), "Attachment storage ready");
    Ok(storage)
}
