use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use service::logging::TracingLogger;
use service::users::repo::seaorm::SeaOrmUserRepository;
use service::users::{User, UserService};

use crate::errors::ApiError;

/// Concrete service wiring used by the HTTP layer.
pub type AppUserService = UserService<SeaOrmUserRepository, TracingLogger>;

#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<AppUserService>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub full_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { id: user.id, full_name: user.full_name }
    }
}

#[utoipa::path(get, path = "/api/users", tag = "users",
    responses((status = 200, description = "All users", body = [UserResponse])))]
pub async fn get_all(
    State(state): State<ServerState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.get_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No user with that id")))]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(user.into()))
}

#[utoipa::path(post, path = "/api/users", tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = UserResponse),
        (status = 400, description = "Missing name or rejected write")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
    if input.full_name.trim().is_empty() {
        return Err(ApiError::BadRequest("full_name must not be empty".into()));
    }
    let created = state
        .users
        .create(User::new(input.full_name))
        .await?
        .ok_or_else(|| ApiError::BadRequest("user could not be created".into()))?;
    let location = format!("/api/users/{}", created.id);
    let body = Json(UserResponse::from(created));
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], body).into_response())
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No user with that id")))]
pub async fn delete_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.users.delete_by_id(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::OK)
}
