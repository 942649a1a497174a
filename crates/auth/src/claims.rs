use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::{AuthError, Permission};

/// Upper bound on configurable clock skew.
const MAX_LEEWAY_SECS: u64 = 3_600;

/// Expected issuer/audience and clock tolerance for token validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Expected `iss` claim (exact match).
    pub issuer: String,

    /// Expected audience; the `aud` claim must contain it.
    pub audience: String,

    /// Clock skew tolerated on `exp` and `iat`, in seconds.
    pub leeway_secs: u64,
}

impl ValidatorConfig {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            leeway_secs: 0,
        }
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

/// Verified claims of a bearer token.
///
/// Only the token validator constructs this type, and only after the
/// signature, time window, issuer and audience have all been checked, so
/// holding a `Claims` means holding a fully trusted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    subject: String,
    issuer: String,
    audience: Vec<String>,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    permissions: BTreeSet<Permission>,
}

impl Claims {
    /// Subject / principal identifier.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &[String] {
        &self.audience
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    #[cfg(test)]
    pub(crate) fn for_tests<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let now = Utc::now();
        Self {
            subject: "auth0|tester".to_string(),
            issuer: "https://casting.test/".to_string(),
            audience: vec!["casting".to_string()],
            issued_at: now,
            expires_at: now + Duration::minutes(10),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}

/// `aud` may be a single string or an array of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn into_vec(self) -> Vec<String> {
        match self {
            Audience::One(aud) => vec![aud],
            Audience::Many(auds) => auds,
        }
    }
}

/// Claims as they appear in the token payload (signature already checked).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawClaims {
    sub: String,
    iss: String,
    aud: Audience,
    iat: i64,
    exp: i64,
    #[serde(default)]
    permissions: Option<Vec<String>>,
}

/// Deterministically check the claims of a signature-verified token.
///
/// Expiry is checked first so an expired token always reports
/// `TokenExpired`, whatever else is wrong with it.
pub(crate) fn verify_claims(
    raw: RawClaims,
    config: &ValidatorConfig,
    now: DateTime<Utc>,
) -> Result<Claims, AuthError> {
    let leeway = Duration::seconds(config.leeway_secs.min(MAX_LEEWAY_SECS) as i64);

    let expires_at = timestamp(raw.exp, "exp")?;
    let issued_at = timestamp(raw.iat, "iat")?;

    let expired = expires_at
        .checked_add_signed(leeway)
        .is_some_and(|deadline| deadline < now);
    if expired {
        return Err(AuthError::TokenExpired);
    }
    if expires_at <= issued_at {
        return Err(AuthError::invalid_claims("exp must be after iat"));
    }
    let premature = now
        .checked_add_signed(leeway)
        .is_some_and(|latest| issued_at > latest);
    if premature {
        return Err(AuthError::invalid_claims("token issued in the future"));
    }
    if raw.iss != config.issuer {
        return Err(AuthError::invalid_claims("issuer mismatch"));
    }

    let audience = raw.aud.into_vec();
    if !audience.iter().any(|aud| *aud == config.audience) {
        return Err(AuthError::invalid_claims("audience mismatch"));
    }

    let permissions = raw
        .permissions
        .unwrap_or_default()
        .into_iter()
        .map(Permission::new)
        .collect();

    Ok(Claims {
        subject: raw.sub,
        issuer: raw.iss,
        audience,
        issued_at,
        expires_at,
        permissions,
    })
}

fn timestamp(secs: i64, field: &str) -> Result<DateTime<Utc>, AuthError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::invalid_claims(format!("{field} out of range")))
}
