//! JSON Web Token issuing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::error::{auth::AuthError, AppError};

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing keys plus the token lifetime.
///
/// Cheap to clone, shared through `AppState`.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, expires_in_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in: Duration::days(expires_in_days),
        }
    }

    /// Issues an access token for the user, valid from now.
    pub fn issue(&self, user_id: i32, email: &str) -> Result<String, AppError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issues an access token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: i32,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }

    /// Validates signature and expiry and returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let keys = JwtKeys::new("secret", 7);
        let token = keys.issue(42, "a@example.com").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = JwtKeys::new("one", 7).issue(1, "a@example.com").unwrap();

        assert!(matches!(
            JwtKeys::new("two", 7).verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let keys = JwtKeys::new("secret", 1);
        let token = keys
            .issue_at(1, "a@example.com", Utc::now() - Duration::days(3))
            .unwrap();

        assert!(keys.verify(&token).is_err());
    }
}
