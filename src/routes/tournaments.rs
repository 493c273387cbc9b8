use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    dto::tournament::{
        CreateTournamentRequest, MembershipRequest, TournamentDetailResponse, TournamentResponse,
        TournamentsResponse, UpdateTournamentRequest,
    },
    error::AppError,
    services::{membership, tournaments},
    state::SharedState,
};

/// Tournament CRUD plus the roster subtree, scoped to the calling account.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/tournament", post(create_tournament).get(list_tournaments))
        .route(
            "/tournament/{id}",
            get(get_tournament)
                .put(update_tournament)
                .delete(delete_tournament),
        )
        .route(
            "/tournament/{id}/team",
            post(add_team).delete(remove_team),
        )
}

/// Create a tournament owned by the caller.
#[utoipa::path(
    post,
    path = "/tournament",
    tag = "tournament",
    request_body = CreateTournamentRequest,
    responses(
        (status = 200, description = "Tournament created", body = TournamentResponse),
        (status = 400, description = "Invalid payload or name taken")
    )
)]
pub async fn create_tournament(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Valid(Json(payload)): Valid<Json<CreateTournamentRequest>>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(
        tournaments::create_tournament(&state, auth.id, payload).await?,
    ))
}

/// List the caller's tournaments.
#[utoipa::path(
    get,
    path = "/tournament",
    tag = "tournament",
    responses(
        (status = 200, description = "Tournaments owned by the caller", body = TournamentsResponse),
        (status = 400, description = "No tournaments found")
    )
)]
pub async fn list_tournaments(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<TournamentsResponse>, AppError> {
    Ok(Json(tournaments::list_tournaments(&state, auth.id).await?))
}

/// Fetch one of the caller's tournaments.
#[utoipa::path(
    get,
    path = "/tournament/{id}",
    tag = "tournament",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    responses(
        (status = 200, description = "Tournament found", body = TournamentResponse),
        (status = 400, description = "Tournament not found")
    )
)]
pub async fn get_tournament(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(tournaments::get_tournament(&state, auth.id, id).await?))
}

/// Rewrite the name and description of one of the caller's tournaments.
#[utoipa::path(
    put,
    path = "/tournament/{id}",
    tag = "tournament",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    request_body = UpdateTournamentRequest,
    responses(
        (status = 200, description = "Tournament updated", body = TournamentResponse),
        (status = 400, description = "Invalid payload or tournament not found")
    )
)]
pub async fn update_tournament(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdateTournamentRequest>>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(
        tournaments::update_tournament(&state, auth.id, id, payload).await?,
    ))
}

/// Delete one of the caller's tournaments.
#[utoipa::path(
    delete,
    path = "/tournament/{id}",
    tag = "tournament",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    responses(
        (status = 200, description = "Tournament deleted", body = TournamentResponse),
        (status = 400, description = "Tournament not found")
    )
)]
pub async fn delete_tournament(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(tournaments::delete_tournament(&state, auth.id, id).await?))
}

/// Enroll one of the caller's teams into one of their tournaments.
#[utoipa::path(
    post,
    path = "/tournament/{id}/team",
    tag = "tournament",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    request_body = MembershipRequest,
    responses(
        (status = 200, description = "Team enrolled, roster expanded", body = TournamentDetailResponse),
        (status = 400, description = "Missing teamId, unknown entity, duplicate or full roster")
    )
)]
pub async fn add_team(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MembershipRequest>,
) -> Result<Json<TournamentDetailResponse>, AppError> {
    Ok(Json(membership::add_team(&state, auth.id, id, payload).await?))
}

/// Withdraw a team from one of the caller's tournaments.
#[utoipa::path(
    delete,
    path = "/tournament/{id}/team",
    tag = "tournament",
    params(("id" = Uuid, Path, description = "Identifier of the tournament")),
    request_body = MembershipRequest,
    responses(
        (status = 200, description = "Team withdrawn", body = TournamentResponse),
        (status = 400, description = "Missing teamId, unknown entity or absent membership")
    )
)]
pub async fn remove_team(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MembershipRequest>,
) -> Result<Json<TournamentResponse>, AppError> {
    Ok(Json(
        membership::remove_team(&state, auth.id, id, payload).await?,
    ))
}
