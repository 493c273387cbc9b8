use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    dto::team::{CreateTeamRequest, TeamResponse, TeamsResponse, UpdateTeamRequest},
    error::AppError,
    services::teams,
    state::SharedState,
};

/// Team CRUD subtree, always scoped to the calling account.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/team", post(create_team).get(list_teams))
        .route(
            "/team/{id}",
            get(get_team).put(update_team).delete(delete_team),
        )
}

/// Create a team owned by the caller.
#[utoipa::path(
    post,
    path = "/team",
    tag = "team",
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team created", body = TeamResponse),
        (status = 400, description = "Invalid payload or name taken")
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Valid(Json(payload)): Valid<Json<CreateTeamRequest>>,
) -> Result<Json<TeamResponse>, AppError> {
    Ok(Json(teams::create_team(&state, auth.id, payload).await?))
}

/// List the caller's teams.
#[utoipa::path(
    get,
    path = "/team",
    tag = "team",
    responses(
        (status = 200, description = "Teams owned by the caller", body = TeamsResponse),
        (status = 400, description = "No teams found")
    )
)]
pub async fn list_teams(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<TeamsResponse>, AppError> {
    Ok(Json(teams::list_teams(&state, auth.id).await?))
}

/// Fetch one of the caller's teams.
#[utoipa::path(
    get,
    path = "/team/{id}",
    tag = "team",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Team found", body = TeamResponse),
        (status = 400, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, AppError> {
    Ok(Json(teams::get_team(&state, auth.id, id).await?))
}

/// Update one of the caller's teams.
#[utoipa::path(
    put,
    path = "/team/{id}",
    tag = "team",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 400, description = "Invalid payload or team not found")
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    Ok(Json(teams::update_team(&state, auth.id, id, payload).await?))
}

/// Delete one of the caller's teams.
#[utoipa::path(
    delete,
    path = "/team/{id}",
    tag = "team",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Team deleted", body = TeamResponse),
        (status = 400, description = "Team not found")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, AppError> {
    Ok(Json(teams::delete_team(&state, auth.id, id).await?))
}
