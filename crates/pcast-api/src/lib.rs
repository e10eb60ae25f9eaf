//! Pcast API Library
//!
//! This crate provides the HTTP handlers, authentication and application
//! setup for the podcast module's episode editor.

pub mod auth;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use auth::{GrantedCapabilities, JwtClaims, JwtService};
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
