//! Persistence entities shared across layers and storage backends.
//!
//! Identifiers are UUIDs serialized as plain strings, both in stored
//! documents (under the `_id` key) and on the wire.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role granted to a stored account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Full access, including the `/admin` routes.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Regular account restricted to its own resources.
    #[default]
    #[serde(rename = "USER")]
    User,
}

/// A registered account. The `password` field always holds a bcrypt hash,
/// never the clear text submitted at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    /// Stable identifier for the account.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Given name of the account holder.
    pub name: String,
    /// Family name of the account holder.
    pub surname: String,
    /// Login name, unique across accounts.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Bcrypt hash of the account password.
    pub password: String,
    /// Access level granted to the account.
    pub role: Role,
}

/// Partial update applied to a stored account. `None` fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// A football team owned by one account, carrying its lifetime statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntity {
    /// Stable identifier for the team.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name chosen for the team, unique per owner.
    pub name: String,
    /// Free-form description supplied by the owner.
    pub description: String,
    /// Country the team plays in.
    pub country: String,
    /// Account that created the team; every lookup is scoped to it.
    pub owner: Uuid,
    /// Matches played.
    pub played_matches: i32,
    /// Matches won.
    pub won_matches: i32,
    /// Matches tied.
    pub tied_matches: i32,
    /// Matches lost.
    pub lost_matches: i32,
    /// Goals scored.
    pub pro_goals: i32,
    /// Goals conceded.
    pub again_goals: i32,
    /// Goals scored minus goals conceded.
    pub difference_goals: i32,
    /// League points accumulated.
    pub team_points: i32,
}

impl TeamEntity {
    /// Fresh team for `owner` with every statistic at zero.
    pub fn new(name: String, description: String, country: String, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            country,
            owner,
            played_matches: 0,
            won_matches: 0,
            tied_matches: 0,
            lost_matches: 0,
            pro_goals: 0,
            again_goals: 0,
            difference_goals: 0,
            team_points: 0,
        }
    }
}

/// Partial update applied to a stored team.
#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
}

/// Per-tournament record of one enrolled team. Counters start at zero and
/// track results within this tournament only, independent of the team's
/// lifetime statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMembershipEntity {
    /// Reference to the enrolled [`TeamEntity`].
    pub team: Uuid,
    /// Goals scored.
    pub pro_goals: i32,
    /// Goals conceded.
    pub again_goals: i32,
    /// Goals scored minus goals conceded.
    pub difference_goals: i32,
    /// Points accumulated.
    pub team_points: i32,
    /// Matches won.
    pub won_matches: i32,
    /// Matches tied.
    pub tied_matches: i32,
    /// Matches lost.
    pub lost_matches: i32,
    /// Matches played.
    pub played_matches: i32,
}

impl TeamMembershipEntity {
    /// Membership for `team` with a blank score sheet.
    pub fn new(team: Uuid) -> Self {
        Self {
            team,
            pro_goals: 0,
            again_goals: 0,
            difference_goals: 0,
            team_points: 0,
            won_matches: 0,
            tied_matches: 0,
            lost_matches: 0,
            played_matches: 0,
        }
    }
}

/// A tournament: an owned roster of team memberships plus references to the
/// journeys generated while the roster grew. Memberships embed their
/// statistics; journeys live in their own collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentEntity {
    /// Stable identifier for the tournament.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name chosen for the tournament, unique per owner.
    pub name: String,
    /// Free-form description supplied by the owner.
    pub description: String,
    /// Account that created the tournament.
    pub owner: Uuid,
    /// Memberships of the enrolled teams, in enrollment order.
    pub teams: Vec<TeamMembershipEntity>,
    /// References to the journeys generated while teams joined.
    pub journeys: Vec<Uuid>,
}

impl TournamentEntity {
    /// Empty tournament for `owner`.
    pub fn new(name: String, description: String, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            owner,
            teams: Vec::new(),
            journeys: Vec::new(),
        }
    }
}

/// Partial update applied to a stored tournament.
#[derive(Debug, Clone, Default)]
pub struct TournamentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A round of matches recorded while teams join a tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyEntity {
    /// Stable identifier for the journey.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name of the round.
    pub name: String,
}

impl JourneyEntity {
    /// Journey with a generated id and the given display name.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
