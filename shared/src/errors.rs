//! Error types for the Cafetify application

use thiserror::Error;

/// Reasons a request is rejected by the authentication gate.
///
/// Each reason carries a stable machine-readable code so clients can tell an
/// expired session (log in again) apart from a forged or unknown token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token not found")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Session expired, please log in again")]
    TokenExpired,

    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    /// Stable error code sent in the response body
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "TOKEN_NOT_FOUND",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::TokenExpired => "SESSION_EXPIRED",
            AuthError::UserNotFound => "USER_NOT_FOUND",
        }
    }
}
