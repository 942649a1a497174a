//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWKS_REFRESH_SECS: u64 = 3_600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where the trusted signing keys come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Published JWKS document, refreshed after `refresh`.
    Jwks { url: String, refresh: Duration },
    /// A single RS256 public key.
    RsaPublicKeyPem(String),
    /// Shared HS256 secret (development and tests).
    Hs256Secret(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub leeway_secs: u64,
    pub key_source: KeySource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let key_source = if let Some(url) = var("AUTH_JWKS_URL") {
            let refresh = parse_secs(var("AUTH_JWKS_REFRESH_SECS"), "AUTH_JWKS_REFRESH_SECS")?
                .unwrap_or(DEFAULT_JWKS_REFRESH_SECS);
            KeySource::Jwks {
                url,
                refresh: Duration::from_secs(refresh),
            }
        } else if let Some(pem) = var("AUTH_RSA_PUBLIC_KEY_PEM") {
            KeySource::RsaPublicKeyPem(pem)
        } else if let Some(secret) = var("AUTH_HS256_SECRET") {
            KeySource::Hs256Secret(secret)
        } else {
            return Err(ConfigError::Missing(
                "AUTH_JWKS_URL | AUTH_RSA_PUBLIC_KEY_PEM | AUTH_HS256_SECRET",
            ));
        };

        let auth = AuthConfig {
            issuer: required("AUTH_ISSUER")?,
            audience: required("AUTH_AUDIENCE")?,
            leeway_secs: parse_secs(var("AUTH_LEEWAY_SECS"), "AUTH_LEEWAY_SECS")?.unwrap_or(0),
            key_source,
        };

        Ok(Self { bind_addr, auth })
    }
}

fn parse_secs(value: Option<String>, var: &'static str) -> Result<Option<u64>, ConfigError> {
    value
        .map(|v| {
            v.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
            })
        })
        .transpose()
}
