//! Pcast Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! authorization primitives shared by every pcast component.

pub mod capability;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use capability::{Capability, CapabilityProvider, StaticCapabilities};
pub use config::PcastConfig;
pub use context::RequestContext;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
