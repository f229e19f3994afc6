use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::get_all,
        crate::routes::users::get_by_id,
        crate::routes::users::create,
        crate::routes::users::delete_by_id,
    ),
    components(
        schemas(
            HealthResponse,
            crate::routes::users::CreateUserRequest,
            crate::routes::users::UserResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
