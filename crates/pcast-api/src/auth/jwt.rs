use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pcast_core::AppError;

use super::models::JwtClaims;

/// HS256 token verification against the shared `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign claims, for issuing tokens to the host platform and in tests
    pub fn sign(&self, claims: &JwtClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate and decode a bearer token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::Unauthorized("Invalid token signature".to_string())
                    }
                    _ => AppError::Unauthorized(format!("Invalid or expired token: {}", e)),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pcast_core::Capability;

    const SECRET: &str = "test-secret-that-is-at-least-32-chars";

    fn claims(exp_offset: i64) -> JwtClaims {
        let now = Utc::now().timestamp();
        JwtClaims {
            sub: 5,
            capabilities: vec![Capability::Write],
            course: Some(2),
            exp: now + exp_offset,
            iat: now,
        }
    }

    #[test]
    fn test_sign_then_validate() {
        let jwt = JwtService::new(SECRET);
        let token = jwt.sign(&claims(600)).unwrap();
        let decoded = jwt.validate_token(&token).unwrap();
        assert_eq!(decoded.sub, 5);
        assert_eq!(decoded.capabilities, vec![Capability::Write]);
        assert_eq!(decoded.course, Some(2));
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = JwtService::new(SECRET);
        let token = jwt.sign(&claims(-600)).unwrap();
        let err = jwt.validate_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref msg) if msg == "Token has expired"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtService::new(SECRET).sign(&claims(600)).unwrap();
        let other = JwtService::new("another-secret-that-is-32-chars-long");
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
