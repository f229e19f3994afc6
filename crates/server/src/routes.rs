use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod users;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, user CRUD and API docs.
pub fn build_router(cors: CorsLayer, state: users::ServerState) -> Router {
    let api = Router::new()
        .route("/api/users", get(users::get_all).post(users::create))
        .route("/api/users/:id", get(users::get_by_id).delete(users::delete_by_id));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One span per request at INFO, without headers
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and friends get an ERROR record
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
