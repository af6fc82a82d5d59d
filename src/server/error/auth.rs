use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The request carried no `Authorization: Bearer` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token failed signature or expiry validation.
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Unknown email or wrong password on login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token is valid but the user it names no longer exists.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// Hashing a password failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Token and credential failures map to 401 Unauthorized with a generic message; the
/// underlying reason is logged at debug level only. Hashing failures map to 500.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::PasswordHash(msg) => {
                tracing::error!("Password hashing failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid credentials".to_string(),
                }),
            )
                .into_response(),
            err => {
                tracing::debug!("Rejected request: {}", err);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "Unauthorized".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
