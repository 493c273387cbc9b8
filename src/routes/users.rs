use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    dto::user::{LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, UserResponse},
    error::AppError,
    services::users,
    state::SharedState,
};

/// Account routes reachable without a session token.
pub fn public_router() -> Router<SharedState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
}

/// Authenticated self-service account routes.
pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/user/{id}",
        get(get_user).put(update_user).delete(delete_user),
    )
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/user/register",
    tag = "user",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid payload or username taken")
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<RegisterRequest>>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::register(&state, payload).await?))
}

/// Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/user/login",
    tag = "user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(users::login(&state, payload).await?))
}

/// Fetch one account by id.
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "user",
    params(("id" = Uuid, Path, description = "Identifier of the account")),
    responses(
        (status = 200, description = "Account found", body = UserResponse),
        (status = 400, description = "Account not found")
    )
)]
pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::get_user(&state, id).await?))
}

/// Update the calling account.
#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "user",
    params(("id" = Uuid, Path, description = "Identifier of the account")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 403, description = "Not the calling account")
    )
)]
pub async fn update_user(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::update_user(&state, auth.id, id, payload).await?))
}

/// Delete the calling account.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "user",
    params(("id" = Uuid, Path, description = "Identifier of the account")),
    responses(
        (status = 200, description = "Account deleted", body = UserResponse),
        (status = 403, description = "Not the calling account")
    )
)]
pub async fn delete_user(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::delete_user(&state, auth.id, id).await?))
}
