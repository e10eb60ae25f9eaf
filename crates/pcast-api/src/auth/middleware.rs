use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use pcast_core::AppError;

use super::models::{AuthUser, GrantedCapabilities};
use crate::error::HttpAppError;
use crate::state::AppState;

/// Verify the bearer token and store the caller in request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    let claims = match state.jwt.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    tracing::debug!(
        user_id = claims.sub,
        capabilities = claims.capabilities.len(),
        course = ?claims.course,
        "Request authenticated"
    );

    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        capabilities: GrantedCapabilities::from(&claims),
    });

    next.run(request).await
}
