//! JWKS-backed key source: fetch the authority's published keys lazily,
//! cache them, and refresh on a fixed interval.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::keys::{KeyError, KeySet, KeyStore, VerificationKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// Convert the RS256 signing keys of this set into a [`KeySet`].
    ///
    /// Keys of other types, encryption keys and keys pinned to another
    /// algorithm are skipped. A set with nothing usable is an error.
    pub fn to_key_set(&self) -> Result<KeySet, KeyError> {
        let mut keys = Vec::new();
        for jwk in &self.keys {
            if jwk.kty != "RSA" {
                continue;
            }
            if jwk.use_field.as_deref().is_some_and(|u| u != "sig") {
                continue;
            }
            if jwk.alg.as_deref().is_some_and(|a| a != "RS256") {
                continue;
            }
            let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
                continue;
            };

            let mut key = VerificationKey::rs256_components(n, e)?;
            if let Some(kid) = &jwk.kid {
                key = key.with_kid(kid.clone());
            }
            keys.push(key);
        }

        if keys.is_empty() {
            return Err(KeyError::NoUsableKeys);
        }
        Ok(KeySet::new(keys))
    }
}

/// Abstracts retrieval of a JWKS document.
#[async_trait::async_trait]
pub trait JwksFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Jwks, KeyError>;
}

/// Upper bound on a single JWKS request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a failed first fetch is reported before the endpoint is tried again.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Fetch JWKS documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpJwksFetcher {
    client: reqwest::Client,
}

impl HttpJwksFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, KeyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KeyError::Fetch(e.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait::async_trait]
impl JwksFetcher for HttpJwksFetcher {
    async fn fetch(&self, url: &str) -> Result<Jwks, KeyError> {
        self.client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| KeyError::Fetch(e.to_string()))?
            .json::<Jwks>()
            .await
            .map_err(|e| KeyError::Fetch(e.to_string()))
    }
}

/// Keeps a [`KeyStore`] populated from a JWKS endpoint.
///
/// The first caller triggers the fetch; concurrent callers wait for that same
/// fetch instead of issuing their own. After `refresh_interval` the next caller
/// refreshes. A failed refresh keeps serving the previous keys until the next
/// interval elapses. With no keys at all, a failed fetch is returned to every
/// caller for `retry_delay` before the endpoint is tried again.
pub struct JwksKeyProvider {
    url: String,
    refresh_interval: Duration,
    retry_delay: Duration,
    store: Arc<KeyStore>,
    fetcher: Arc<dyn JwksFetcher>,
    last_attempt: RwLock<Option<Instant>>,
    last_failure: RwLock<Option<(Instant, KeyError)>>,
    gate: tokio::sync::Mutex<()>,
}

impl JwksKeyProvider {
    pub fn new(
        url: impl Into<String>,
        refresh_interval: Duration,
        store: Arc<KeyStore>,
    ) -> Result<Self, KeyError> {
        let fetcher = HttpJwksFetcher::with_timeout(DEFAULT_FETCH_TIMEOUT)?;
        Ok(Self::with_fetcher(url, refresh_interval, store, Arc::new(fetcher)))
    }

    pub fn with_fetcher(
        url: impl Into<String>,
        refresh_interval: Duration,
        store: Arc<KeyStore>,
        fetcher: Arc<dyn JwksFetcher>,
    ) -> Self {
        Self {
            url: url.into(),
            refresh_interval,
            retry_delay: DEFAULT_RETRY_DELAY,
            store,
            fetcher,
            last_attempt: RwLock::new(None),
            last_failure: RwLock::new(None),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn store(&self) -> Arc<KeyStore> {
        Arc::clone(&self.store)
    }

    /// Make sure the store holds keys no older than the refresh interval.
    pub async fn ensure_fresh(&self) -> Result<(), KeyError> {
        if let Some(outcome) = self.settled() {
            return outcome;
        }

        let _guard = self.gate.lock().await;
        // Another caller may have completed the fetch while we waited.
        if let Some(outcome) = self.settled() {
            return outcome;
        }
        self.fetch_locked().await
    }

    /// Fetch immediately, regardless of age (e.g. after a key rotation).
    pub async fn refresh(&self) -> Result<(), KeyError> {
        let _guard = self.gate.lock().await;
        self.fetch_locked().await
    }

    async fn fetch_locked(&self) -> Result<(), KeyError> {
        let result = match self.fetcher.fetch(&self.url).await {
            Ok(jwks) => jwks.to_key_set(),
            Err(e) => Err(e),
        };

        match result {
            Ok(keys) => {
                tracing::info!(url = %self.url, keys = keys.len(), "loaded signing keys");
                self.store.replace(keys);
                self.mark_attempt();
                *self
                    .last_failure
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = None;
                Ok(())
            }
            Err(e) if !self.store.snapshot().is_empty() => {
                tracing::warn!(url = %self.url, error = %e, "key refresh failed; keeping previous keys");
                self.mark_attempt();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "key fetch failed; no keys loaded");
                *self
                    .last_failure
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some((Instant::now(), e.clone()));
                Err(e)
            }
        }
    }

    /// Outcome that needs no fetch: fresh keys, or a failure still inside the
    /// retry delay.
    fn settled(&self) -> Option<Result<(), KeyError>> {
        if self.is_fresh() {
            return Some(Ok(()));
        }
        self.last_failure
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|(at, _)| at.elapsed() < self.retry_delay)
            .map(|(_, e)| Err(e.clone()))
    }

    fn is_fresh(&self) -> bool {
        self.last_attempt
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some_and(|at| at.elapsed() < self.refresh_interval)
    }

    fn mark_attempt(&self) {
        *self
            .last_attempt
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
    }
}

impl core::fmt::Debug for JwksKeyProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JwksKeyProvider")
            .field("url", &self.url)
            .field("refresh_interval", &self.refresh_interval)
            .field("retry_delay", &self.retry_delay)
            .finish_non_exhaustive()
    }
}
