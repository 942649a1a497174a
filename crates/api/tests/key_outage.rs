use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

use casting_api::middleware::AuthState;
use casting_auth::{Jwks, JwksFetcher, JwksKeyProvider, KeyError, KeyStore, ValidatorConfig};

const ISSUER: &str = "https://casting.test/";
const AUDIENCE: &str = "casting";

/// Identity provider that never answers.
struct UnreachableFetcher;

#[async_trait::async_trait]
impl JwksFetcher for UnreachableFetcher {
    async fn fetch(&self, _url: &str) -> Result<Jwks, KeyError> {
        Err(KeyError::Fetch("connection refused".to_string()))
    }
}

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn_without_keys() -> Self {
        let provider = JwksKeyProvider::with_fetcher(
            "https://casting.test/.well-known/jwks.json",
            Duration::from_secs(3600),
            Arc::new(KeyStore::default()),
            Arc::new(UnreachableFetcher),
        );
        let auth = AuthState::with_jwks(ValidatorConfig::new(ISSUER, AUDIENCE), provider);
        let app = casting_api::app::build_app(auth);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn well_formed_token() -> String {
    let now = Utc::now();
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some("k1".to_string());
    jsonwebtoken::encode(
        &header,
        &json!({
            "sub": "auth0|tester",
            "iss": ISSUER,
            "aud": AUDIENCE,
            "iat": now.timestamp(),
            "exp": (now + ChronoDuration::minutes(10)).timestamp(),
            "permissions": ["get:actors"],
        }),
        &EncodingKey::from_secret(b"unused"),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn missing_header_is_401_even_without_keys() {
    let srv = TestServer::spawn_without_keys().await;

    let res = srv.client.get(srv.url("/actors")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn malformed_header_is_401_even_without_keys() {
    let srv = TestServer::spawn_without_keys().await;

    let res = srv
        .client
        .get(srv.url("/movies"))
        .header("Authorization", format!("Beareer {}", well_formed_token()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_header");
}

#[tokio::test]
async fn bearer_token_without_keys_is_503() {
    let srv = TestServer::spawn_without_keys().await;

    let res = srv
        .client
        .get(srv.url("/actors"))
        .bearer_auth(well_formed_token())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "keys_unavailable");
}
