use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use casting_auth::{
    AuthError, JwksKeyProvider, KeyError, KeySet, KeyStore, TokenValidator, ValidatorConfig,
    VerificationKey, extract_bearer,
};

use crate::app::errors;
use crate::config::{AuthConfig, KeySource};
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<TokenValidator>,
    /// Present when keys come from a JWKS endpoint and must be kept fresh.
    pub jwks: Option<Arc<JwksKeyProvider>>,
}

impl AuthState {
    /// Validation against a fixed key set.
    pub fn with_static_keys(config: ValidatorConfig, keys: KeySet) -> Self {
        let store = Arc::new(KeyStore::new(keys));
        Self {
            validator: Arc::new(TokenValidator::new(config, store)),
            jwks: None,
        }
    }

    /// Validation against keys published at a JWKS endpoint.
    pub fn with_jwks(config: ValidatorConfig, provider: JwksKeyProvider) -> Self {
        Self {
            validator: Arc::new(TokenValidator::new(config, provider.store())),
            jwks: Some(Arc::new(provider)),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, KeyError> {
        let validator_config = ValidatorConfig::new(&config.issuer, &config.audience)
            .with_leeway(config.leeway_secs);

        match &config.key_source {
            KeySource::Hs256Secret(secret) => Ok(Self::with_static_keys(
                validator_config,
                KeySet::single(VerificationKey::hs256(secret.as_bytes())),
            )),
            KeySource::RsaPublicKeyPem(pem) => Ok(Self::with_static_keys(
                validator_config,
                KeySet::single(VerificationKey::rs256_pem(pem.as_bytes())?),
            )),
            KeySource::Jwks { url, refresh } => {
                let provider =
                    JwksKeyProvider::new(url.clone(), *refresh, Arc::new(KeyStore::default()))?;
                Ok(Self::with_jwks(validator_config, provider))
            }
        }
    }
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    // Header shape is checked before any key material is needed.
    let token = match bearer_token(&req) {
        Ok(token) => token,
        Err(e) => return reject(&req, e),
    };

    if let Some(jwks) = &state.jwks {
        if let Err(e) = jwks.ensure_fresh().await {
            tracing::warn!(url = jwks.url(), error = %e, "signing keys unavailable");
            return errors::key_error_to_response(&e);
        }
    }

    let claims = match state.validator.validate_token(&token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => return reject(&req, e),
    };

    req.extensions_mut().insert(PrincipalContext::new(claims));

    next.run(req).await
}

/// Owned so the request is not borrowed across the key refresh.
fn bearer_token(req: &Request) -> Result<String, AuthError> {
    let header = match req.headers().get(AUTHORIZATION).map(|v| v.to_str()) {
        None => None,
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => return Err(AuthError::InvalidHeaderFormat),
    };
    extract_bearer(header).map(str::to_owned)
}

fn reject(req: &Request, err: AuthError) -> Response {
    tracing::debug!(
        method = %req.method(),
        path = req.uri().path(),
        code = err.code(),
        "request not authenticated"
    );
    errors::auth_error_to_response(err)
}
