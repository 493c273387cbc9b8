//! Tournament CRUD. Regular operations are scoped to the owning account;
//! the `admin_` variants reach every tournament regardless of owner. Role
//! enforcement for those happens in the routing layer.

use uuid::Uuid;

use crate::{
    dao::models::{TournamentEntity, TournamentUpdate},
    dto::{
        tournament::{
            AdminUpdateTournamentRequest, CreateTournamentRequest, TournamentResponse,
            TournamentsResponse, UpdateTournamentRequest,
        },
        validation,
    },
    error::ServiceError,
    state::SharedState,
};

/// Create an empty tournament for `owner`.
pub async fn create_tournament(
    state: &SharedState,
    owner: Uuid,
    request: CreateTournamentRequest,
) -> Result<TournamentResponse, ServiceError> {
    let store = state.require_store().await?;

    if store
        .find_tournament_by_name(Some(owner), request.name.clone())
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(
            "a tournament with this name already exists".into(),
        ));
    }

    let tournament = TournamentEntity::new(request.name, request.description, owner);
    store.save_tournament(tournament.clone()).await?;

    Ok(TournamentResponse {
        message: Some("tournament created successfully".into()),
        tournament: tournament.into(),
    })
}

/// List every tournament owned by the caller.
pub async fn list_tournaments(
    state: &SharedState,
    owner: Uuid,
) -> Result<TournamentsResponse, ServiceError> {
    let store = state.require_store().await?;

    let tournaments = store.list_tournaments(Some(owner)).await?;
    if tournaments.is_empty() {
        return Err(ServiceError::NotFound("tournaments not found".into()));
    }

    Ok(TournamentsResponse {
        tournaments: tournaments.into_iter().map(Into::into).collect(),
    })
}

/// Fetch one of the caller's tournaments, roster kept as references.
pub async fn get_tournament(
    state: &SharedState,
    owner: Uuid,
    id: Uuid,
) -> Result<TournamentResponse, ServiceError> {
    let store = state.require_store().await?;

    let tournament = store
        .find_tournament_owned(id, owner)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    Ok(TournamentResponse {
        message: None,
        tournament: tournament.into(),
    })
}

/// Rewrite the name and description of one of the caller's tournaments.
pub async fn update_tournament(
    state: &SharedState,
    owner: Uuid,
    id: Uuid,
    request: UpdateTournamentRequest,
) -> Result<TournamentResponse, ServiceError> {
    let store = state.require_store().await?;

    let tournament = store
        .find_tournament_owned(id, owner)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    // Keeping the current name never conflicts with itself.
    if tournament.name != request.name
        && store
            .find_tournament_by_name(Some(owner), request.name.clone())
            .await?
            .is_some()
    {
        return Err(ServiceError::Conflict(
            "a tournament with this name already exists".into(),
        ));
    }

    let update = TournamentUpdate {
        name: Some(request.name),
        description: Some(request.description),
    };

    let tournament = store
        .update_tournament(id, Some(owner), update)
        .await?
        .ok_or_else(|| ServiceError::UpdateFailed("tournament not found or not updated".into()))?;

    Ok(TournamentResponse {
        message: Some("tournament updated successfully".into()),
        tournament: tournament.into(),
    })
}

/// Delete one of the caller's tournaments. Journeys it references are left
/// in place.
pub async fn delete_tournament(
    state: &SharedState,
    owner: Uuid,
    id: Uuid,
) -> Result<TournamentResponse, ServiceError> {
    let store = state.require_store().await?;

    store
        .find_tournament_owned(id, owner)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    let tournament = store
        .delete_tournament(id, Some(owner))
        .await?
        .ok_or_else(|| {
            ServiceError::UpdateFailed("tournament not found or already deleted".into())
        })?;

    Ok(TournamentResponse {
        message: Some("tournament deleted successfully".into()),
        tournament: tournament.into(),
    })
}

/// List every tournament in the system.
pub async fn admin_list_tournaments(
    state: &SharedState,
) -> Result<TournamentsResponse, ServiceError> {
    let store = state.require_store().await?;

    let tournaments = store.list_tournaments(None).await?;
    if tournaments.is_empty() {
        return Err(ServiceError::NotFound("tournaments not found".into()));
    }

    Ok(TournamentsResponse {
        tournaments: tournaments.into_iter().map(Into::into).collect(),
    })
}

/// Fetch any tournament by id.
pub async fn admin_get_tournament(
    state: &SharedState,
    id: Uuid,
) -> Result<TournamentResponse, ServiceError> {
    let store = state.require_store().await?;

    let tournament = store
        .find_tournament(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    Ok(TournamentResponse {
        message: Some("tournament found".into()),
        tournament: tournament.into(),
    })
}

/// Update any tournament. The name-taken check runs across all owners here,
/// unlike the owner-scoped path.
pub async fn admin_update_tournament(
    state: &SharedState,
    id: Uuid,
    request: AdminUpdateTournamentRequest,
) -> Result<TournamentResponse, ServiceError> {
    if validation::any_blank([&request.name, &request.description]) {
        return Err(ServiceError::Validation(
            "empty values are not allowed".into(),
        ));
    }
    if request.name.is_none() && request.description.is_none() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }

    let store = state.require_store().await?;

    let tournament = store
        .find_tournament(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    if let Some(name) = &request.name {
        if tournament.name != *name
            && store
                .find_tournament_by_name(None, name.clone())
                .await?
                .is_some()
        {
            return Err(ServiceError::Conflict(
                "a tournament with this name already exists".into(),
            ));
        }
    }

    let update = TournamentUpdate {
        name: request.name,
        description: request.description,
    };

    let tournament = store
        .update_tournament(id, None, update)
        .await?
        .ok_or_else(|| ServiceError::UpdateFailed("tournament not found or not updated".into()))?;

    Ok(TournamentResponse {
        message: Some("tournament updated successfully".into()),
        tournament: tournament.into(),
    })
}

/// Delete any tournament by id.
pub async fn admin_delete_tournament(
    state: &SharedState,
    id: Uuid,
) -> Result<TournamentResponse, ServiceError> {
    let store = state.require_store().await?;

    store
        .find_tournament(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    let tournament = store.delete_tournament(id, None).await?.ok_or_else(|| {
        ServiceError::UpdateFailed("tournament not found or already deleted".into())
    })?;

    Ok(TournamentResponse {
        message: Some("tournament deleted successfully".into()),
        tournament: tournament.into(),
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

    fn creation(name: &str) -> CreateTournamentRequest {
        CreateTournamentRequest {
            name: name.into(),
            description: "Winter cup".into(),
        }
    }

    #[tokio::test]
    async fn created_tournaments_start_empty() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();

        let response = create_tournament(&state, owner, creation("Cup")).await.unwrap();
        assert_eq!(response.tournament.owner, owner);
        assert!(response.tournament.teams.is_empty());
        assert!(response.tournament.journeys.is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_are_scoped_to_the_owner() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();

        create_tournament(&state, owner, creation("Cup")).await.unwrap();
        let err = create_tournament(&state, owner, creation("Cup"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // Another account may reuse the name.
        create_tournament(&state, Uuid::new_v4(), creation("Cup"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_rewrites_name_and_description() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();
        let created = create_tournament(&state, owner, creation("Cup")).await.unwrap();

        let updated = update_tournament(
            &state,
            owner,
            created.tournament.id,
            UpdateTournamentRequest {
                name: "Cup".into(),
                description: "Spring cup".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.tournament.name, "Cup");
        assert_eq!(updated.tournament.description, "Spring cup");
    }

    #[tokio::test]
    async fn renaming_onto_another_tournament_conflicts() {
        let state = state_with_store().await;
        let owner = Uuid::new_v4();
        create_tournament(&state, owner, creation("Cup")).await.unwrap();
        let other = create_tournament(&state, owner, creation("Liga")).await.unwrap();

        let err = update_tournament(
            &state,
            owner,
            other.tournament.id,
            UpdateTournamentRequest {
                name: "Cup".into(),
                description: "Winter cup".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn lookups_do_not_cross_account_boundaries() {
        let state = state_with_store().await;
        let created = create_tournament(&state, Uuid::new_v4(), creation("Cup"))
            .await
            .unwrap();
        let stranger = Uuid::new_v4();
        let id = created.tournament.id;

        let err = get_tournament(&state, stranger, id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = update_tournament(
            &state,
            stranger,
            id,
            UpdateTournamentRequest {
                name: "Stolen".into(),
                description: "Stolen".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = delete_tournament(&state, stranger, id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn listing_reports_when_the_caller_has_none() {
        let state = state_with_store().await;

        let err = list_tournaments(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn admin_surface_reaches_any_owner() {
        let state = state_with_store().await;
        let created = create_tournament(&state, Uuid::new_v4(), creation("Cup"))
            .await
            .unwrap();
        let id = created.tournament.id;

        let fetched = admin_get_tournament(&state, id).await.unwrap();
        assert_eq!(fetched.tournament.id, id);

        let updated = admin_update_tournament(
            &state,
            id,
            AdminUpdateTournamentRequest {
                description: Some("Relabelled".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.tournament.description, "Relabelled");
        assert_eq!(updated.tournament.name, "Cup");

        let listed = admin_list_tournaments(&state).await.unwrap();
        assert_eq!(listed.tournaments.len(), 1);

        admin_delete_tournament(&state, id).await.unwrap();
        let err = admin_get_tournament(&state, id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn admin_update_requires_some_field() {
        let state = state_with_store().await;
        let created = create_tournament(&state, Uuid::new_v4(), creation("Cup"))
            .await
            .unwrap();

        let err = admin_update_tournament(
            &state,
            created.tournament.id,
            AdminUpdateTournamentRequest::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn admin_rename_check_spans_every_owner() {
        let state = state_with_store().await;
        create_tournament(&state, Uuid::new_v4(), creation("Cup")).await.unwrap();
        let other = create_tournament(&state, Uuid::new_v4(), creation("Liga"))
            .await
            .unwrap();

        let err = admin_update_tournament(
            &state,
            other.tournament.id,
            AdminUpdateTournamentRequest {
                name: Some("Cup".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
