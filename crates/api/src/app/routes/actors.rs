use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use casting_auth::Operation;
use casting_core::{ActorId, Entity};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_actors).post(create_actor))
        .route("/:id", get(get_actor).delete(delete_actor))
}

pub async fn list_actors(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::ListActors) {
        return errors::auth_error_to_response(e);
    }

    let actors = services.catalog.list_actors();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "actors": actors })),
    )
        .into_response()
}

pub async fn get_actor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::GetActor) {
        return errors::auth_error_to_response(e);
    }
    let id: ActorId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.get_actor(id) {
        Ok(actor) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "actor": actor })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_actor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::CreateActorRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::CreateActor) {
        return errors::auth_error_to_response(e);
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.catalog.create_actor(body.into()) {
        Ok(actor) => {
            tracing::info!(actor_id = %actor.id(), subject = principal.subject(), "actor created");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "created": actor.id(),
                    "actor": actor,
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_actor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::authorize(&principal, Operation::DeleteActor) {
        return errors::auth_error_to_response(e);
    }
    let id: ActorId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.delete_actor(id) {
        Ok(deleted) => {
            tracing::info!(actor_id = %deleted, subject = principal.subject(), "actor deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "success": true, "deleted": deleted })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
