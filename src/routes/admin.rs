use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    auth,
    dto::{
        tournament::{AdminUpdateTournamentRequest, TournamentResponse, TournamentsResponse},
        user::{
            AdminCreateUserRequest, SearchUserRequest, UpdateUserRequest, UserResponse,
            UsersResponse,
        },
    },
    error::AppError,
    services::{tournaments, users},
    state::SharedState,
};

/// Admin-only management subtree. Every route re-checks the stored role
/// through [`auth::require_admin`].
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/users", get(admin_list_users).post(admin_create_user))
        .route("/admin/users/search", post(admin_search_user))
        .route(
            "/admin/users/{id}",
            put(admin_update_user).delete(admin_delete_user),
        )
        .route("/admin/tournaments", get(admin_list_tournaments))
        .route(
            "/admin/tournaments/{id}",
            get(admin_get_tournament)
                .put(admin_update_tournament)
                .delete(admin_delete_tournament),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}

/// List every registered account.
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "All registered accounts", body = UsersResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn admin_list_users(
    State(state): State<SharedState>,
) -> Result<Json<UsersResponse>, AppError> {
    Ok(Json(users::admin_list_users(&state).await?))
}

/// Create an account with an arbitrary role.
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "admin",
    request_body = AdminCreateUserRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid payload or username taken")
    )
)]
pub async fn admin_create_user(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<AdminCreateUserRequest>>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::admin_create_user(&state, payload).await?))
}

/// Find an account by its login name.
#[utoipa::path(
    post,
    path = "/admin/users/search",
    tag = "admin",
    request_body = SearchUserRequest,
    responses(
        (status = 200, description = "Account found", body = UserResponse),
        (status = 400, description = "Account not found")
    )
)]
pub async fn admin_search_user(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SearchUserRequest>>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::admin_search_user(&state, payload).await?))
}

/// Update any account, role changes included.
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Identifier of the account")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn admin_update_user(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::admin_update_user(&state, id, payload).await?))
}

/// Delete any account.
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Identifier of the account")),
    responses(
        (status = 200, description = "Account deleted", body = UserResponse),
        (status = 401, description = "Account missing or already deleted")
    )
)]
pub async fn admin_delete_user(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(users::admin_delete_user(&state, id).await?))
}

/// List every tournament in the system.
#[utoipa::path(
    get,
    path = "/admin/tournaments",
    tag = "admin",
    responses(
        (status = 200, description = "All tournaments", body = TournamentsResponse),
        (status = 400, description = "No tournaments found")
    )
)]
pub async fn admin_list_tournaments(
    State(state): State<SharedState>,
) -> Result<Json<TournamentsResponse>, AppError> {
    Ok(Json(tournaments::admin_list_tournaments(&state).await?))
}

/// Fetch any tournament by id.
#[utoipa::path(
    get,
    path = "/admin/tournaments/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    responses(
        (status = 200, description = "Tournament found", body = TournamentResponse),
        (status = 400, description = "Tournament not found")
    )
)]
pub async fn admin_get_tournament(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(tournaments::admin_get_tournament(&state, id).await?))
}

/// Update any tournament.
#[utoipa::path(
    put,
    path = "/admin/tournaments/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    request_body = AdminUpdateTournamentRequest,
    responses(
        (status = 200, description = "Tournament updated", body = TournamentResponse),
        (status = 400, description = "Invalid payload or tournament not found")
    )
)]
pub async fn admin_update_tournament(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdminUpdateTournamentRequest>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(
        tournaments::admin_update_tournament(&state, id, payload).await?,
    ))
}

/// Delete any tournament.
#[utoipa::path(
    delete,
    path = "/admin/tournaments/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    responses(
        (status = 200, description = "Tournament deleted", body = TournamentResponse),
        (status = 400, description = "Tournament not found")
    )
)]
pub async fn admin_delete_tournament(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(tournaments::admin_delete_tournament(&state, id).await?))
}
