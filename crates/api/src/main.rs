use anyhow::Context;

use casting_api::config::ApiConfig;
use casting_api::middleware::AuthState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    casting_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let auth = AuthState::from_config(&config.auth).context("invalid signing key")?;

    // Warm the key cache so the first request does not pay for the fetch.
    if let Some(jwks) = &auth.jwks {
        if let Err(e) = jwks.ensure_fresh().await {
            tracing::warn!(url = jwks.url(), error = %e, "initial key fetch failed; will retry on demand");
        }
    }

    let app = casting_api::app::build_app(auth);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, issuer = %config.auth.issuer, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
