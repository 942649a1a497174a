//! Bearer token validation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Validation;

use crate::bearer::extract_bearer;
use crate::claims::{RawClaims, ValidatorConfig, verify_claims};
use crate::keys::KeyStore;
use crate::{AuthError, Claims};

/// Turns a raw `Authorization` header into verified [`Claims`].
///
/// Holds no per-request state: the same validator is shared by every request
/// and reads key material through an immutable snapshot of its [`KeyStore`].
#[derive(Debug, Clone)]
pub struct TokenValidator {
    config: ValidatorConfig,
    keys: Arc<KeyStore>,
}

impl TokenValidator {
    pub fn new(config: ValidatorConfig, keys: Arc<KeyStore>) -> Self {
        Self { config, keys }
    }

    pub fn keys(&self) -> &Arc<KeyStore> {
        &self.keys
    }

    /// Validate the `Authorization` header of a request.
    ///
    /// `None` means the header was absent.
    pub fn validate(
        &self,
        raw_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Claims, AuthError> {
        let token = extract_bearer(raw_header)?;
        self.validate_token(token, now)
    }

    /// Validate a bare token (no scheme prefix).
    ///
    /// Checks run in order: signature, expiry, remaining time window,
    /// issuer, audience.
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let header = jsonwebtoken::decode_header(token).map_err(|_| AuthError::InvalidSignature)?;

        let keys = self.keys.snapshot();
        let key = keys
            .select(header.kid.as_deref())
            .ok_or(AuthError::InvalidSignature)?;

        // Only the signature and algorithm are checked here; every claim is
        // checked against the caller-supplied `now` in `verify_claims`.
        let mut validation = Validation::new(key.algorithm());
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let data = jsonwebtoken::decode::<RawClaims>(token, key.decoding_key(), &validation)
            .map_err(map_decode_error)?;

        verify_claims(data.claims, &self.config, now)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::Json(e) => AuthError::invalid_claims(e.to_string()),
        ErrorKind::Utf8(_) => AuthError::invalid_claims("payload is not valid UTF-8"),
        _ => AuthError::InvalidSignature,
    }
}
