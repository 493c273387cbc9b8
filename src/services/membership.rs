//! Roster mutations: enrolling a team into a tournament and withdrawing it,
//! plus the journey records that accumulate while the roster grows. This is
//! the only code that writes `teams` entries or creates journeys.

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::{
    dao::{
        entity_store::EntityStore,
        models::{JourneyEntity, TeamEntity, TeamMembershipEntity, TournamentEntity},
    },
    dto::tournament::{
        MembershipRequest, ResolvedMembership, TournamentDetail, TournamentDetailResponse,
        TournamentResponse,
    },
    error::ServiceError,
    state::SharedState,
};

/// Upper bound on enrolled teams per tournament.
const TEAM_CAPACITY: usize = 10;

/// Enroll a team into a tournament owned by the acting account.
///
/// Checks run in a fixed order, each with its own failure: the body must
/// name a team, the team must belong to the caller, the tournament must not
/// already contain it, the tournament must belong to the caller, and the
/// roster must be under capacity. The first team of a tournament opens no
/// round; each later addition records one journey named after the
/// pre-insertion roster size.
pub async fn add_team(
    state: &SharedState,
    acting: Uuid,
    tournament_id: Uuid,
    request: MembershipRequest,
) -> Result<TournamentDetailResponse, ServiceError> {
    let team_id = request
        .team_id
        .ok_or_else(|| ServiceError::Validation("the teamId field is required".into()))?;

    let store = state.require_store().await?;

    // One roster mutation at a time per tournament: the duplicate and
    // capacity checks below read state that the insert further down changes.
    let gate = state.tournament_gate(tournament_id);
    let _guard = gate.lock().await;

    store
        .find_team_owned(team_id, acting)
        .await?
        .ok_or_else(|| ServiceError::NotFound("team not found".into()))?;

    // The membership probe is not ownership-scoped; an enrollment under any
    // account still counts as a duplicate.
    if store.membership_exists(tournament_id, team_id).await? {
        return Err(ServiceError::Conflict(
            "team is already in this tournament".into(),
        ));
    }

    let tournament = store
        .find_tournament_owned(tournament_id, acting)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    if tournament.teams.len() >= TEAM_CAPACITY {
        return Err(ServiceError::Capacity(
            "cannot add this team because the maximum number of teams was reached".into(),
        ));
    }

    let members_before = tournament.teams.len();
    let _ = store
        .push_membership(tournament_id, TeamMembershipEntity::new(team_id))
        .await?;

    if members_before > 0 {
        let journey = JourneyEntity::new(format!("Journey {members_before}"));
        store.save_journey(journey.clone()).await?;
        let _ = store.push_journey(tournament_id, journey.id).await?;
    }

    let tournament = store.find_tournament(tournament_id).await?.ok_or_else(|| {
        ServiceError::NotFound("the team could not be saved in this tournament".into())
    })?;
    let tournament = resolve_roster(&store, tournament).await?;

    Ok(TournamentDetailResponse {
        message: Some("team added to the tournament".into()),
        tournament,
    })
}

/// Withdraw a team from a tournament owned by the acting account.
///
/// Journeys recorded while the roster grew stay behind; only the membership
/// entry is removed.
pub async fn remove_team(
    state: &SharedState,
    acting: Uuid,
    tournament_id: Uuid,
    request: MembershipRequest,
) -> Result<TournamentResponse, ServiceError> {
    let team_id = request
        .team_id
        .ok_or_else(|| ServiceError::Validation("the teamId field is required".into()))?;

    let store = state.require_store().await?;

    let gate = state.tournament_gate(tournament_id);
    let _guard = gate.lock().await;

    store
        .find_tournament_owned(tournament_id, acting)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    store
        .find_team_owned(team_id, acting)
        .await?
        .ok_or_else(|| ServiceError::NotFound("team not found".into()))?;

    if !store.membership_exists(tournament_id, team_id).await? {
        return Err(ServiceError::Conflict(
            "team does not exist in this tournament".into(),
        ));
    }

    let tournament = store
        .pull_membership(tournament_id, team_id)
        .await?
        .ok_or_else(|| {
            ServiceError::UpdateFailed(
                "team not found or already removed from this tournament".into(),
            )
        })?;

    Ok(TournamentResponse {
        message: Some("team removed from the tournament".into()),
        tournament: tournament.into(),
    })
}

/// Expand every roster entry to its full team record. Entries whose team
/// has been deleted since enrollment resolve to `None`.
async fn resolve_roster(
    store: &Arc<dyn EntityStore>,
    tournament: TournamentEntity,
) -> Result<TournamentDetail, ServiceError> {
    let ids: Vec<Uuid> = tournament.teams.iter().map(|m| m.team).collect();
    let mut teams: HashMap<Uuid, TeamEntity> = store
        .find_teams_by_ids(ids)
        .await?
        .into_iter()
        .map(|team| (team.id, team))
        .collect();

    Ok(TournamentDetail {
        id: tournament.id,
        name: tournament.name,
        description: tournament.description,
        owner: tournament.owner,
        teams: tournament
            .teams
            .into_iter()
            .map(|membership| {
                let team = teams.remove(&membership.team);
                ResolvedMembership::from((membership, team))
            })
            .collect(),
        journeys: tournament.journeys,
    })
}
