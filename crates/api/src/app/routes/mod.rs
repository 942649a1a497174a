use axum::Router;

pub mod actors;
pub mod movies;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/actors", actors::router())
        .nest("/movies", movies::router())
}
