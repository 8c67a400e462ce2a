use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::events::UserEventPublisher;
use crate::models::{CreateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "user";

/// OpenAPI documentation for the user endpoints
#[derive(OpenApi)]
#[openapi(
    paths(create_user, list_users, delete_user),
    components(
        schemas(CreateUser, UserResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User registration")
    )
)]
pub struct ApiDoc;

type SharedService<R, P> = Arc<UserService<R, P>>;

/// `/user`, `/user/all` and `/user/{id}`; the app nests this under `/api`.
pub fn router<R, P>(service: UserService<R, P>) -> Router
where
    R: UserRepository + 'static,
    P: UserEventPublisher + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/user", post(create_user))
        .route("/user/all", get(list_users))
        .route("/user/{id}", delete(delete_user))
        .with_state(shared_service)
}

/// Register a user and queue their welcome email
#[utoipa::path(
    post,
    path = "/api/user",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository, P: UserEventPublisher>(
    State(service): State<SharedService<R, P>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/user/all",
    tag = TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository, P: UserEventPublisher>(
    State(service): State<SharedService<R, P>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    Ok(Json(service.list_users().await?))
}

#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = TAG,
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository, P: UserEventPublisher>(
    State(service): State<SharedService<R, P>>,
    UuidPath(id): UuidPath,
) -> UserResult<StatusCode> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
