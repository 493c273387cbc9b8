#[cfg(test)]
pub mod memory;
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{
    JourneyEntity, TeamEntity, TeamMembershipEntity, TeamUpdate, TournamentEntity,
    TournamentUpdate, UserEntity, UserUpdate,
};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for accounts, teams, tournaments
/// and journeys.
///
/// Update and delete operations return the affected document (after the
/// change for updates, before removal for deletes) or `None` when the filter
/// matched nothing. Ownership-scoped lookups take the owning account id and
/// match only documents created by that account.
pub trait EntityStore: Send + Sync {
    // Accounts.
    fn save_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    fn find_user_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>>;
    fn update_user(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    fn delete_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;

    // Teams.
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_team_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    fn find_team_by_name(
        &self,
        owner: Uuid,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    fn list_teams(&self, owner: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    fn find_teams_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    fn update_team(
        &self,
        id: Uuid,
        owner: Uuid,
        update: TeamUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    fn delete_team(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;

    // Tournaments. The `owner: Option<Uuid>` parameters drop the ownership
    // filter when `None`, which is how the admin surface reaches documents
    // of every account.
    fn save_tournament(
        &self,
        tournament: TournamentEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn find_tournament(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;
    fn find_tournament_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;
    fn find_tournament_by_name(
        &self,
        owner: Option<Uuid>,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;
    fn list_tournaments(
        &self,
        owner: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<TournamentEntity>>>;
    fn update_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        update: TournamentUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;
    fn delete_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;

    // Roster membership inside one tournament document.
    fn membership_exists(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    fn push_membership(
        &self,
        tournament_id: Uuid,
        membership: TeamMembershipEntity,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;
    fn pull_membership(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;
    fn push_journey(
        &self,
        tournament_id: Uuid,
        journey_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;

    // Journeys.
    fn save_journey(&self, journey: JourneyEntity) -> BoxFuture<'static, StorageResult<()>>;

    // Connectivity.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
