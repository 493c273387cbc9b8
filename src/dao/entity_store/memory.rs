//! In-memory [`EntityStore`] backing the service tests.
//!
//! Mirrors the filter semantics of the MongoDB store (ownership scoping,
//! membership probes, update-or-none results) over plain hash maps.

use std::{collections::HashMap, sync::Arc};

use futures::future::BoxFuture;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    entity_store::EntityStore,
    models::{
        JourneyEntity, TeamEntity, TeamMembershipEntity, TeamUpdate, TournamentEntity,
        TournamentUpdate, UserEntity, UserUpdate,
    },
    storage::StorageResult,
};

/// Map-backed store with the same observable behavior as the MongoDB one.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    users: RwLock<HashMap<Uuid, UserEntity>>,
    teams: RwLock<HashMap<Uuid, TeamEntity>>,
    tournaments: RwLock<HashMap<Uuid, TournamentEntity>>,
    journeys: RwLock<HashMap<Uuid, JourneyEntity>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every stored journey, for assertions on the generation
    /// cascade.
    pub async fn journey_names(&self) -> Vec<String> {
        let journeys = self.inner.journeys.read().await;
        let mut names: Vec<String> = journeys.values().map(|j| j.name.clone()).collect();
        names.sort();
        names
    }
}

impl EntityStore for MemoryStore {
    fn save_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.users.write().await.insert(user.id, user);
            Ok(())
        })
    }

    fn find_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.users.read().await.get(&id).cloned()) })
    }

    fn find_user_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let users = store.inner.users.read().await;
            Ok(users.values().find(|u| u.username == username).cloned())
        })
    }

    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.users.read().await.values().cloned().collect()) })
    }

    fn update_user(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut users = store.inner.users.write().await;
            let Some(user) = users.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(name) = update.name {
                user.name = name;
            }
            if let Some(surname) = update.surname {
                user.surname = surname;
            }
            if let Some(username) = update.username {
                user.username = username;
            }
            if let Some(email) = update.email {
                user.email = email;
            }
            if let Some(role) = update.role {
                user.role = role;
            }
            Ok(Some(user.clone()))
        })
    }

    fn delete_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.users.write().await.remove(&id)) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.teams.write().await.insert(team.id, team);
            Ok(())
        })
    }

    fn find_team_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let teams = store.inner.teams.read().await;
            Ok(teams.get(&id).filter(|t| t.owner == owner).cloned())
        })
    }

    fn find_team_by_name(
        &self,
        owner: Uuid,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let teams = store.inner.teams.read().await;
            Ok(teams
                .values()
                .find(|t| t.owner == owner && t.name == name)
                .cloned())
        })
    }

    fn list_teams(&self, owner: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let teams = store.inner.teams.read().await;
            Ok(teams
                .values()
                .filter(|t| t.owner == owner)
                .cloned()
                .collect())
        })
    }

    fn find_teams_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let teams = store.inner.teams.read().await;
            Ok(ids.iter().filter_map(|id| teams.get(id).cloned()).collect())
        })
    }

    fn update_team(
        &self,
        id: Uuid,
        owner: Uuid,
        update: TeamUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut teams = store.inner.teams.write().await;
            let Some(team) = teams.get_mut(&id).filter(|t| t.owner == owner) else {
                return Ok(None);
            };
            if let Some(name) = update.name {
                team.name = name;
            }
            if let Some(description) = update.description {
                team.description = description;
            }
            if let Some(country) = update.country {
                team.country = country;
            }
            Ok(Some(team.clone()))
        })
    }

    fn delete_team(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut teams = store.inner.teams.write().await;
            if teams.get(&id).is_some_and(|t| t.owner == owner) {
                Ok(teams.remove(&id))
            } else {
                Ok(None)
            }
        })
    }

    fn save_tournament(&self, tournament: TournamentEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .inner
                .tournaments
                .write()
                .await
                .insert(tournament.id, tournament);
            Ok(())
        })
    }

    fn find_tournament(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.tournaments.read().await.get(&id).cloned()) })
    }

    fn find_tournament_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let tournaments = store.inner.tournaments.read().await;
            Ok(tournaments.get(&id).filter(|t| t.owner == owner).cloned())
        })
    }

    fn find_tournament_by_name(
        &self,
        owner: Option<Uuid>,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let tournaments = store.inner.tournaments.read().await;
            Ok(tournaments
                .values()
                .find(|t| t.name == name && owner.is_none_or(|o| t.owner == o))
                .cloned())
        })
    }

    fn list_tournaments(
        &self,
        owner: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let tournaments = store.inner.tournaments.read().await;
            Ok(tournaments
                .values()
                .filter(|t| owner.is_none_or(|o| t.owner == o))
                .cloned()
                .collect())
        })
    }

    fn update_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        update: TournamentUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut tournaments = store.inner.tournaments.write().await;
            let Some(tournament) = tournaments
                .get_mut(&id)
                .filter(|t| owner.is_none_or(|o| t.owner == o))
            else {
                return Ok(None);
            };
            if let Some(name) = update.name {
                tournament.name = name;
            }
            if let Some(description) = update.description {
                tournament.description = description;
            }
            Ok(Some(tournament.clone()))
        })
    }

    fn delete_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut tournaments = store.inner.tournaments.write().await;
            if tournaments
                .get(&id)
                .is_some_and(|t| owner.is_none_or(|o| t.owner == o))
            {
                Ok(tournaments.remove(&id))
            } else {
                Ok(None)
            }
        })
    }

    fn membership_exists(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let tournaments = store.inner.tournaments.read().await;
            Ok(tournaments
                .get(&tournament_id)
                .is_some_and(|t| t.teams.iter().any(|m| m.team == team_id)))
        })
    }

    fn push_membership(
        &self,
        tournament_id: Uuid,
        membership: TeamMembershipEntity,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut tournaments = store.inner.tournaments.write().await;
            let Some(tournament) = tournaments.get_mut(&tournament_id) else {
                return Ok(None);
            };
            tournament.teams.push(membership);
            Ok(Some(tournament.clone()))
        })
    }

    fn pull_membership(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut tournaments = store.inner.tournaments.write().await;
            let Some(tournament) = tournaments
                .get_mut(&tournament_id)
                .filter(|t| t.teams.iter().any(|m| m.team == team_id))
            else {
                return Ok(None);
            };
            tournament.teams.retain(|m| m.team != team_id);
            Ok(Some(tournament.clone()))
        })
    }

    fn push_journey(
        &self,
        tournament_id: Uuid,
        journey_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut tournaments = store.inner.tournaments.write().await;
            let Some(tournament) = tournaments.get_mut(&tournament_id) else {
                return Ok(None);
            };
            tournament.journeys.push(journey_id);
            Ok(Some(tournament.clone()))
        })
    }

    fn save_journey(&self, journey: JourneyEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .inner
                .journeys
                .write()
                .await
                .insert(journey.id, journey);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
