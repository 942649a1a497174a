//! `Authorization` header parsing.

use crate::AuthError;

/// Scheme keyword expected in the `Authorization` header (case-sensitive).
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from a raw `Authorization` header value.
///
/// The header must be exactly `Bearer <token>`: the keyword, one space and a
/// single non-empty token segment. Anything else (another keyword, missing
/// token, extra segments, doubled spaces) is rejected without attempting to
/// repair it.
pub fn extract_bearer(raw_header: Option<&str>) -> Result<&str, AuthError> {
    let header = raw_header.ok_or(AuthError::MissingToken)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::InvalidHeaderFormat),
    }
}
