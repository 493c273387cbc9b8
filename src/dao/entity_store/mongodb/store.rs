use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Collection, Database,
    bson::{Document, doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{doc_id, doc_id_owned, doc_id_scoped},
};
use crate::dao::{
    entity_store::EntityStore,
    models::{
        JourneyEntity, TeamEntity, TeamMembershipEntity, TeamUpdate, TournamentEntity,
        TournamentUpdate, UserEntity, UserUpdate,
    },
    storage::StorageResult,
};

const USER_COLLECTION: &str = "users";
const TEAM_COLLECTION: &str = "teams";
const TOURNAMENT_COLLECTION: &str = "tournaments";
const JOURNEY_COLLECTION: &str = "journeys";

/// MongoDB-backed [`EntityStore`].
///
/// The handle is immutable: when connectivity is lost the supervisor drops
/// the whole store and connects a fresh one, so no reconnect state lives
/// here.
#[derive(Clone)]
pub struct MongoEntityStore {
    database: Database,
}

impl MongoEntityStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (_client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let store = Self { database };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let users = self.database.collection::<Document>(USER_COLLECTION);
        let username_index = mongodb::IndexModel::builder()
            .keys(doc! {"username": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("user_username_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        users
            .create_index(username_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: USER_COLLECTION,
                index: "username",
                source,
            })?;

        let teams = self.database.collection::<Document>(TEAM_COLLECTION);
        let team_owner_index = mongodb::IndexModel::builder()
            .keys(doc! {"owner": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("team_owner_idx".to_owned()))
                    .build(),
            )
            .build();
        teams
            .create_index(team_owner_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: TEAM_COLLECTION,
                index: "owner",
                source,
            })?;

        let tournaments = self.database.collection::<Document>(TOURNAMENT_COLLECTION);
        let tournament_owner_index = mongodb::IndexModel::builder()
            .keys(doc! {"owner": 1, "name": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("tournament_owner_name_idx".to_owned()))
                    .build(),
            )
            .build();
        tournaments
            .create_index(tournament_owner_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: TOURNAMENT_COLLECTION,
                index: "owner,name",
                source,
            })?;

        Ok(())
    }

    fn users(&self) -> Collection<UserEntity> {
        self.database.collection(USER_COLLECTION)
    }

    fn teams(&self) -> Collection<TeamEntity> {
        self.database.collection(TEAM_COLLECTION)
    }

    fn tournaments(&self) -> Collection<TournamentEntity> {
        self.database.collection(TOURNAMENT_COLLECTION)
    }

    fn journeys(&self) -> Collection<JourneyEntity> {
        self.database.collection(JOURNEY_COLLECTION)
    }

    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn save_user(&self, user: UserEntity) -> MongoResult<()> {
        self.users()
            .insert_one(user)
            .await
            .map_err(MongoDaoError::operation(USER_COLLECTION, "insert user"))?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> MongoResult<Option<UserEntity>> {
        self.users()
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(USER_COLLECTION, "find user"))
    }

    async fn find_user_by_username(&self, username: String) -> MongoResult<Option<UserEntity>> {
        self.users()
            .find_one(doc! {"username": username})
            .await
            .map_err(MongoDaoError::operation(
                USER_COLLECTION,
                "find user by username",
            ))
    }

    async fn list_users(&self) -> MongoResult<Vec<UserEntity>> {
        self.users()
            .find(doc! {})
            .await
            .map_err(MongoDaoError::operation(USER_COLLECTION, "list users"))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(USER_COLLECTION, "list users"))
    }

    async fn update_user(&self, id: Uuid, update: UserUpdate) -> MongoResult<Option<UserEntity>> {
        let mut set = Document::new();
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(surname) = update.surname {
            set.insert("surname", surname);
        }
        if let Some(username) = update.username {
            set.insert("username", username);
        }
        if let Some(email) = update.email {
            set.insert("email", email);
        }
        if let Some(role) = update.role {
            let role = to_bson(&role).map_err(|source| MongoDaoError::Encode {
                collection: USER_COLLECTION,
                source,
            })?;
            set.insert("role", role);
        }
        if set.is_empty() {
            // An empty update degenerates to a read.
            return self.find_user(id).await;
        }

        self.users()
            .find_one_and_update(doc_id(id), doc! {"$set": set})
            .return_document(ReturnDocument::After)
            .await
            .map_err(MongoDaoError::operation(USER_COLLECTION, "update user"))
    }

    async fn delete_user(&self, id: Uuid) -> MongoResult<Option<UserEntity>> {
        self.users()
            .find_one_and_delete(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(USER_COLLECTION, "delete user"))
    }

    async fn save_team(&self, team: TeamEntity) -> MongoResult<()> {
        self.teams()
            .insert_one(team)
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "insert team"))?;
        Ok(())
    }

    async fn find_team_owned(&self, id: Uuid, owner: Uuid) -> MongoResult<Option<TeamEntity>> {
        self.teams()
            .find_one(doc_id_owned(id, owner))
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "find team"))
    }

    async fn find_team_by_name(&self, owner: Uuid, name: String) -> MongoResult<Option<TeamEntity>> {
        self.teams()
            .find_one(doc! {"owner": owner.to_string(), "name": name})
            .await
            .map_err(MongoDaoError::operation(
                TEAM_COLLECTION,
                "find team by name",
            ))
    }

    async fn list_teams(&self, owner: Uuid) -> MongoResult<Vec<TeamEntity>> {
        self.teams()
            .find(doc! {"owner": owner.to_string()})
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "list teams"))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "list teams"))
    }

    async fn find_teams_by_ids(&self, ids: Vec<Uuid>) -> MongoResult<Vec<TeamEntity>> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        self.teams()
            .find(doc! {"_id": {"$in": ids}})
            .await
            .map_err(MongoDaoError::operation(
                TEAM_COLLECTION,
                "find teams by ids",
            ))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(
                TEAM_COLLECTION,
                "find teams by ids",
            ))
    }

    async fn update_team(
        &self,
        id: Uuid,
        owner: Uuid,
        update: TeamUpdate,
    ) -> MongoResult<Option<TeamEntity>> {
        let mut set = Document::new();
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(description) = update.description {
            set.insert("description", description);
        }
        if let Some(country) = update.country {
            set.insert("country", country);
        }
        if set.is_empty() {
            return self.find_team_owned(id, owner).await;
        }

        self.teams()
            .find_one_and_update(doc_id_owned(id, owner), doc! {"$set": set})
            .return_document(ReturnDocument::After)
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "update team"))
    }

    async fn delete_team(&self, id: Uuid, owner: Uuid) -> MongoResult<Option<TeamEntity>> {
        self.teams()
            .find_one_and_delete(doc_id_owned(id, owner))
            .await
            .map_err(MongoDaoError::operation(TEAM_COLLECTION, "delete team"))
    }

    async fn save_tournament(&self, tournament: TournamentEntity) -> MongoResult<()> {
        self.tournaments()
            .insert_one(tournament)
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "insert tournament",
            ))?;
        Ok(())
    }

    async fn find_tournament(&self, id: Uuid) -> MongoResult<Option<TournamentEntity>> {
        self.tournaments()
            .find_one(doc_id(id))
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "find tournament",
            ))
    }

    async fn find_tournament_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> MongoResult<Option<TournamentEntity>> {
        self.tournaments()
            .find_one(doc_id_owned(id, owner))
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "find tournament",
            ))
    }

    async fn find_tournament_by_name(
        &self,
        owner: Option<Uuid>,
        name: String,
    ) -> MongoResult<Option<TournamentEntity>> {
        let mut filter = doc! {"name": name};
        if let Some(owner) = owner {
            filter.insert("owner", owner.to_string());
        }
        self.tournaments()
            .find_one(filter)
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "find tournament by name",
            ))
    }

    async fn list_tournaments(&self, owner: Option<Uuid>) -> MongoResult<Vec<TournamentEntity>> {
        let filter = match owner {
            Some(owner) => doc! {"owner": owner.to_string()},
            None => doc! {},
        };
        self.tournaments()
            .find(filter)
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "list tournaments",
            ))?
            .try_collect()
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "list tournaments",
            ))
    }

    async fn update_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        update: TournamentUpdate,
    ) -> MongoResult<Option<TournamentEntity>> {
        let mut set = Document::new();
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(description) = update.description {
            set.insert("description", description);
        }
        if set.is_empty() {
            let filter = doc_id_scoped(id, owner);
            return self
                .tournaments()
                .find_one(filter)
                .await
                .map_err(MongoDaoError::operation(
                    TOURNAMENT_COLLECTION,
                    "find tournament",
                ));
        }

        self.tournaments()
            .find_one_and_update(doc_id_scoped(id, owner), doc! {"$set": set})
            .return_document(ReturnDocument::After)
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "update tournament",
            ))
    }

    async fn delete_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> MongoResult<Option<TournamentEntity>> {
        self.tournaments()
            .find_one_and_delete(doc_id_scoped(id, owner))
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "delete tournament",
            ))
    }

    async fn membership_exists(&self, tournament_id: Uuid, team_id: Uuid) -> MongoResult<bool> {
        let found = self
            .tournaments()
            .find_one(doc! {
                "_id": tournament_id.to_string(),
                "teams.team": team_id.to_string(),
            })
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "probe membership",
            ))?;
        Ok(found.is_some())
    }

    async fn push_membership(
        &self,
        tournament_id: Uuid,
        membership: TeamMembershipEntity,
    ) -> MongoResult<Option<TournamentEntity>> {
        let membership = to_bson(&membership).map_err(|source| MongoDaoError::Encode {
            collection: TOURNAMENT_COLLECTION,
            source,
        })?;

        self.tournaments()
            .find_one_and_update(doc_id(tournament_id), doc! {"$push": {"teams": membership}})
            .return_document(ReturnDocument::After)
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "push membership",
            ))
    }

    async fn pull_membership(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> MongoResult<Option<TournamentEntity>> {
        self.tournaments()
            .find_one_and_update(
                doc! {
                    "_id": tournament_id.to_string(),
                    "teams.team": team_id.to_string(),
                },
                doc! {"$pull": {"teams": {"team": team_id.to_string()}}},
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "pull membership",
            ))
    }

    async fn push_journey(
        &self,
        tournament_id: Uuid,
        journey_id: Uuid,
    ) -> MongoResult<Option<TournamentEntity>> {
        self.tournaments()
            .find_one_and_update(
                doc_id(tournament_id),
                doc! {"$push": {"journeys": journey_id.to_string()}},
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(MongoDaoError::operation(
                TOURNAMENT_COLLECTION,
                "push journey",
            ))
    }

    async fn save_journey(&self, journey: JourneyEntity) -> MongoResult<()> {
        self.journeys()
            .insert_one(journey)
            .await
            .map_err(MongoDaoError::operation(
                JOURNEY_COLLECTION,
                "insert journey",
            ))?;
        Ok(())
    }
}

impl EntityStore for MongoEntityStore {
    fn save_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_user(user).await.map_err(Into::into) })
    }

    fn find_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_user(id).await.map_err(Into::into) })
    }

    fn find_user_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_user_by_username(username)
                .await
                .map_err(Into::into)
        })
    }

    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_users().await.map_err(Into::into) })
    }

    fn update_user(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.update_user(id, update).await.map_err(Into::into) })
    }

    fn delete_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.delete_user(id).await.map_err(Into::into) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_team(team).await.map_err(Into::into) })
    }

    fn find_team_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team_owned(id, owner).await.map_err(Into::into) })
    }

    fn find_team_by_name(
        &self,
        owner: Uuid,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_team_by_name(owner, name)
                .await
                .map_err(Into::into)
        })
    }

    fn list_teams(&self, owner: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams(owner).await.map_err(Into::into) })
    }

    fn find_teams_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_teams_by_ids(ids).await.map_err(Into::into) })
    }

    fn update_team(
        &self,
        id: Uuid,
        owner: Uuid,
        update: TeamUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .update_team(id, owner, update)
                .await
                .map_err(Into::into)
        })
    }

    fn delete_team(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.delete_team(id, owner).await.map_err(Into::into) })
    }

    fn save_tournament(&self, tournament: TournamentEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_tournament(tournament).await.map_err(Into::into) })
    }

    fn find_tournament(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_tournament(id).await.map_err(Into::into) })
    }

    fn find_tournament_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_tournament_owned(id, owner)
                .await
                .map_err(Into::into)
        })
    }

    fn find_tournament_by_name(
        &self,
        owner: Option<Uuid>,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_tournament_by_name(owner, name)
                .await
                .map_err(Into::into)
        })
    }

    fn list_tournaments(
        &self,
        owner: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_tournaments(owner).await.map_err(Into::into) })
    }

    fn update_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        update: TournamentUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .update_tournament(id, owner, update)
                .await
                .map_err(Into::into)
        })
    }

    fn delete_tournament(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_tournament(id, owner)
                .await
                .map_err(Into::into)
        })
    }

    fn membership_exists(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .membership_exists(tournament_id, team_id)
                .await
                .map_err(Into::into)
        })
    }

    fn push_membership(
        &self,
        tournament_id: Uuid,
        membership: TeamMembershipEntity,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .push_membership(tournament_id, membership)
                .await
                .map_err(Into::into)
        })
    }

    fn pull_membership(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .pull_membership(tournament_id, team_id)
                .await
                .map_err(Into::into)
        })
    }

    fn push_journey(
        &self,
        tournament_id: Uuid,
        journey_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .push_journey(tournament_id, journey_id)
                .await
                .map_err(Into::into)
        })
    }

    fn save_journey(&self, journey: JourneyEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_journey(journey).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
