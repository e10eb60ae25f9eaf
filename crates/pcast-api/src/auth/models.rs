use std::collections::HashSet;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pcast_core::models::ModuleContext;
use pcast_core::{AppError, Capability, CapabilityProvider};
use serde::{Deserialize, Serialize};

use crate::error::HttpAppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: i64, // user id
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    /// Course the grants are limited to; absent means every course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<i64>,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Capabilities carried by a verified token.
#[derive(Debug, Clone)]
pub struct GrantedCapabilities {
    user_id: i64,
    granted: HashSet<Capability>,
    course: Option<i64>,
}

impl GrantedCapabilities {
    pub fn new(
        user_id: i64,
        granted: impl IntoIterator<Item = Capability>,
        course: Option<i64>,
    ) -> Self {
        Self {
            user_id,
            granted: granted.into_iter().collect(),
            course,
        }
    }
}

impl From<&JwtClaims> for GrantedCapabilities {
    fn from(claims: &JwtClaims) -> Self {
        Self::new(claims.sub, claims.capabilities.iter().copied(), claims.course)
    }
}

impl CapabilityProvider for GrantedCapabilities {
    fn has_capability(&self, user_id: i64, capability: Capability, context: &ModuleContext) -> bool {
        user_id == self.user_id
            && self.course.is_none_or(|course| course == context.course_id)
            && self.granted.contains(&capability)
    }
}

/// Authenticated caller, stored in request extensions by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub capabilities: GrantedCapabilities,
}

// Extracted from extensions directly so handlers taking Multipart can use it
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Missing authentication context".to_string(),
                ))
            })
    }
}
