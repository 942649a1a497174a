use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use casting_auth::Operation;
use casting_core::{Entity, MovieId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route(
            "/:id",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
}

fn parse_id(id: &str) -> Result<MovieId, axum::response::Response> {
    id.parse().map_err(errors::domain_error_to_response)
}

pub async fn list_movies(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::ListMovies) {
        return errors::auth_error_to_response(e);
    }

    let movies = services.catalog.list_movies();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "movies": movies })),
    )
        .into_response()
}

pub async fn get_movie(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::GetMovie) {
        return errors::auth_error_to_response(e);
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.catalog.get_movie(id) {
        Ok(movie) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "movie": movie })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_movie(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::CreateMovieRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::CreateMovie) {
        return errors::auth_error_to_response(e);
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.catalog.create_movie(body.into()) {
        Ok(movie) => {
            tracing::info!(movie_id = %movie.id(), subject = principal.subject(), "movie created");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "created": movie.id(),
                    "movie": movie,
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_movie(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateMovieRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::UpdateMovie) {
        return errors::auth_error_to_response(e);
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.catalog.update_movie(id, body.into()) {
        Ok(movie) => {
            tracing::info!(movie_id = %movie.id(), subject = principal.subject(), "movie updated");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "success": true, "movie": movie })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_movie(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::DeleteMovie) {
        return errors::auth_error_to_response(e);
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.catalog.delete_movie(id) {
        Ok(deleted) => {
            tracing::info!(movie_id = %deleted, subject = principal.subject(), "movie deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "success": true, "deleted": deleted })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
