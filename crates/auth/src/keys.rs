//! Trusted key material for signature verification.
//!
//! Keys are injected at construction. A [`KeyStore`] hands out immutable
//! [`KeySet`] snapshots; refreshing replaces the whole set in one swap so a
//! validation in flight keeps using the snapshot it started with.

use std::sync::{Arc, PoisonError, RwLock};

use jsonwebtoken::{Algorithm, DecodingKey};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    #[error("key fetch failed: {0}")]
    Fetch(String),

    #[error("key set contains no usable signing keys")]
    NoUsableKeys,
}

/// A single verification key bound to the algorithm it may verify.
#[derive(Clone)]
pub struct VerificationKey {
    kid: Option<String>,
    algorithm: Algorithm,
    key: DecodingKey,
}

impl VerificationKey {
    /// HMAC-SHA256 shared secret.
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            kid: None,
            algorithm: Algorithm::HS256,
            key: DecodingKey::from_secret(secret),
        }
    }

    /// RSA public key in PEM form (PKCS#1 or SPKI), verified as RS256.
    pub fn rs256_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let key =
            DecodingKey::from_rsa_pem(pem).map_err(|e| KeyError::InvalidKey(e.to_string()))?;
        Ok(Self {
            kid: None,
            algorithm: Algorithm::RS256,
            key,
        })
    }

    /// RSA public key from base64url modulus and exponent (JWK form).
    pub fn rs256_components(modulus: &str, exponent: &str) -> Result<Self, KeyError> {
        let key = DecodingKey::from_rsa_components(modulus, exponent)
            .map_err(|e| KeyError::InvalidKey(e.to_string()))?;
        Ok(Self {
            kid: None,
            algorithm: Algorithm::RS256,
            key,
        })
    }

    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    pub fn kid(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.key
    }
}

impl core::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VerificationKey")
            .field("kid", &self.kid)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Immutable set of verification keys.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: Vec<VerificationKey>,
}

impl KeySet {
    pub fn new(keys: Vec<VerificationKey>) -> Self {
        Self { keys }
    }

    pub fn single(key: VerificationKey) -> Self {
        Self { keys: vec![key] }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Pick the key for a token header.
    ///
    /// A token naming a `kid` must match a key with that id exactly; a token
    /// without one is checked against the first key.
    pub fn select(&self, kid: Option<&str>) -> Option<&VerificationKey> {
        match kid {
            Some(kid) => self.keys.iter().find(|k| k.kid() == Some(kid)),
            None => self.keys.first(),
        }
    }
}

/// Shared holder of the current [`KeySet`].
#[derive(Debug, Default)]
pub struct KeyStore {
    current: RwLock<Arc<KeySet>>,
}

impl KeyStore {
    pub fn new(keys: KeySet) -> Self {
        Self {
            current: RwLock::new(Arc::new(keys)),
        }
    }

    /// The key set in effect right now.
    pub fn snapshot(&self) -> Arc<KeySet> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a complete replacement key set.
    pub fn replace(&self, keys: KeySet) {
        let next = Arc::new(keys);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
