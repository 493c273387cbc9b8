//! Team CRUD scoped to the owning account. Every lookup filters on the
//! owner, so one account can never read or modify another account's teams.

use uuid::Uuid;

use crate::{
    dao::models::{TeamEntity, TeamUpdate},
    dto::{
        team::{CreateTeamRequest, TeamResponse, TeamsResponse, UpdateTeamRequest},
        validation,
    },
    error::ServiceError,
    state::SharedState,
};

/// Create a team for `owner` with a blank score sheet.
pub async fn create_team(
    state: &SharedState,
    owner: Uuid,
    request: CreateTeamRequest,
) -> Result<TeamResponse, ServiceError> {
    let store = state.require_store().await?;

    if store
        .find_team_by_name(owner, request.name.clone())
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(
            "a team with this name already exists".into(),
        ));
    }

    let team = TeamEntity::new(request.name, request.description, request.country, owner);
    store.save_team(team.clone()).await?;

    Ok(TeamResponse {
        message: Some("team created successfully".into()),
        team: team.into(),
    })
}

/// Fetch one of the caller's teams.
pub async fn get_team(
    state: &SharedState,
    owner: Uuid,
    id: Uuid,
) -> Result<TeamResponse, ServiceError> {
    let store = state.require_store().await?;

    let team = store
        .find_team_owned(id, owner)
        .await?
        .ok_or_else(|| ServiceError::NotFound("team not found".into()))?;

    Ok(TeamResponse {
        message: None,
        team: team.into(),
    })
}

/// List every team owned by the caller.
pub async fn list_teams(state: &SharedState, owner: Uuid) -> Result<TeamsResponse, ServiceError> {
    let store = state.require_store().await?;

    let teams = store.list_teams(owner).await?;
    if teams.is_empty() {
        return Err(ServiceError::NotFound("teams not found".into()));
    }

    Ok(TeamsResponse {
        teams: teams.into_iter().map(Into::into).collect(),
    })
}

/// Update the descriptive fields of one of the caller's teams.
pub async fn update_team(
    state: &SharedState,
    owner: Uuid,
    id: Uuid,
    request: UpdateTeamRequest,
) -> Result<TeamResponse, ServiceError> {
    if validation::any_blank([&request.name, &request.description, &request.country]) {
        return Err(ServiceError::Validation(
            "empty values are not allowed".into(),
        ));
    }
    if request.name.is_none() && request.description.is_none() && request.country.is_none() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }

    let store = state.require_store().await?;

    store
        .find_team_owned(id, owner)
        .await?
        .ok_or_else(|| ServiceError::NotFound("team not found".into()))?;

    if let Some(name) = &request.name {
        let taken = store
            .find_team_by_name(owner, name.clone())
            .await?
            .is_some_and(|existing| existing.id != id);
        if taken {
            return Err(ServiceError::Conflict(
                "a team with this name already exists".into(),
            ));
        }
    }

    let update = TeamUpdate {
        name: request.name,
        description: request.description,
        country: request.country,
    };

    let team = store
        .update_team(id, owner, update)
        .await?
        .ok_or_else(|| ServiceError::UpdateFailed("team not found or not updated".into()))?;

    Ok(TeamResponse {
        message: Some("team updated successfully".into()),
        team: team.into(),
    })
}

/// Delete one of the caller's teams. Tournaments keep any roster entry that
/// references it; those entries resolve to an empty team from then on.
pub async fn delete_team(
    state: &SharedState,
    owner: Uuid,
    id: Uuid,
) -> Result<TeamResponse, ServiceError> {
    let store = state.require_store().await?;

    store
        .find_team_owned(id, owner)
        .await?
        .ok_or_else(|| ServiceError::NotFound("team not found".into()))?;

    let team = store
        .delete_team(id, owner)
        .await?
        .ok_or_else(|| ServiceError::UpdateFailed("team not found or already deleted".into()))?;

    Ok(TeamResponse {
        message: Some("team deleted successfully".into()),
        team: team.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::entity_store::memory::MemoryStore,
        state::{AppState, SharedState},
    };

    async fn state_with_store() -> SharedState {
        let state = AppState::new(AppConfig::default());
        let store = Arc::new(MemoryStore::new());
        state.install_store(store).await;
        state
    }

    fn creation(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.into(),
            description: "Sunday league".into(),
            country: "Scotland".into(),
        }
    }

    #[tokio::test]
    async fn created_teams_start_with_zeroed_statistics() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();

        let response = create_team(&state, owner, creation("Red Lions"))
            .await
            .unwrap();
        assert_eq!(response.team.played_matches, 0);
        assert_eq!(response.team.team_points, 0);
        assert_eq!(response.team.owner, owner);
    }

    #[tokio::test]
    async fn duplicate_names_are_scoped_to_the_owner() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();

        create_team(&state, owner, creation("Red Lions")).await.unwrap();
        let err = create_team(&state, owner, creation("Red Lions"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // Another account may reuse the name.
        create_team(&state, Uuid::new_v4(), creation("Red Lions"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn lookups_do_not_cross_account_boundaries() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();
        let team = create_team(&state, owner, creation("Red Lions"))
            .await
            .unwrap();

        let err = get_team(&state, Uuid::new_v4(), team.team.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = delete_team(&state, Uuid::new_v4(), team.team.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rewrites_only_the_provided_fields() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();
        let team = create_team(&state, owner, creation("Red Lions"))
            .await
            .unwrap();

        let updated = update_team(
            &state,
            owner,
            team.team.id,
            UpdateTeamRequest {
                country: Some("Wales".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.team.country, "Wales");
        assert_eq!(updated.team.name, "Red Lions");
    }

    #[tokio::test]
    async fn update_rejects_blank_and_empty_payloads() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();
        let team = create_team(&state, owner, creation("Red Lions"))
            .await
            .unwrap();

        let err = update_team(&state, owner, team.team.id, UpdateTeamRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = update_team(
            &state,
            owner,
            team.team.id,
            UpdateTeamRequest {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn listing_reports_when_the_caller_has_no_teams() {
        let state = state_with_store().await;

        let err = list_teams(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
