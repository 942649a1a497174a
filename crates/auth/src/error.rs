use thiserror::Error;

use crate::Permission;

/// Authentication and authorization outcomes other than success.
///
/// All variants are expected, recoverable outcomes reported to the caller.
/// Everything except [`AuthError::Forbidden`] means the caller was not
/// authenticated; `Forbidden` means an authenticated caller lacks the
/// permission the operation requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization header is missing")]
    MissingToken,

    #[error("authorization header must have the form `Bearer <token>`")]
    InvalidHeaderFormat,

    #[error("token signature could not be verified")]
    InvalidSignature,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

impl AuthError {
    pub fn invalid_claims(msg: impl Into<String>) -> Self {
        Self::InvalidClaims(msg.into())
    }

    /// Stable machine-readable code for error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidHeaderFormat => "invalid_header",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::Forbidden(_) => "forbidden",
        }
    }

    /// `true` when the caller is authenticated but lacks a permission.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::Forbidden(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            AuthError::MissingToken,
            AuthError::InvalidHeaderFormat,
            AuthError::InvalidSignature,
            AuthError::TokenExpired,
            AuthError::invalid_claims("iss"),
            AuthError::Forbidden(Permission::new("get:actors")),
        ];

        let mut codes: Vec<&str> = errors.iter().map(AuthError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn only_forbidden_is_forbidden() {
        assert!(AuthError::Forbidden(Permission::new("get:actors")).is_forbidden());
        assert!(!AuthError::TokenExpired.is_forbidden());
        assert!(!AuthError::MissingToken.is_forbidden());
    }

    #[test]
    fn forbidden_message_names_permission() {
        let err = AuthError::Forbidden(Permission::new("delete:movies"));
        assert_eq!(err.to_string(), "forbidden: missing permission 'delete:movies'");
    }
}
