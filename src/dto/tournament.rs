//! DTO definitions for tournaments and their rosters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{TeamEntity, TeamMembershipEntity, TournamentEntity},
    dto::team::TeamSummary,
};

/// Payload for creating a tournament.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, message = "the name field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "the description field is required"))]
    pub description: String,
}

/// Payload rewriting a tournament's descriptive fields.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateTournamentRequest {
    #[validate(length(min = 1, message = "the name field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "the description field is required"))]
    pub description: String,
}

/// Partial tournament update used by the admin surface.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdminUpdateTournamentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body naming the team for roster operations. The id is optional so its
/// absence surfaces as an explicit validation error instead of a
/// deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub team_id: Option<Uuid>,
}

/// One roster entry with its per-tournament counters.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSummary {
    pub team: Uuid,
    pub pro_goals: i32,
    pub again_goals: i32,
    pub difference_goals: i32,
    pub team_points: i32,
    pub won_matches: i32,
    pub tied_matches: i32,
    pub lost_matches: i32,
    pub played_matches: i32,
}

impl From<TeamMembershipEntity> for MembershipSummary {
    fn from(value: TeamMembershipEntity) -> Self {
        Self {
            team: value.team,
            pro_goals: value.pro_goals,
            again_goals: value.again_goals,
            difference_goals: value.difference_goals,
            team_points: value.team_points,
            won_matches: value.won_matches,
            tied_matches: value.tied_matches,
            lost_matches: value.lost_matches,
            played_matches: value.played_matches,
        }
    }
}

/// Roster entry with the referenced team expanded. The team is `None` when
/// the underlying document has been deleted since enrollment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMembership {
    pub team: Option<TeamSummary>,
    pub pro_goals: i32,
    pub again_goals: i32,
    pub difference_goals: i32,
    pub team_points: i32,
    pub won_matches: i32,
    pub tied_matches: i32,
    pub lost_matches: i32,
    pub played_matches: i32,
}

impl From<(TeamMembershipEntity, Option<TeamEntity>)> for ResolvedMembership {
    fn from((membership, team): (TeamMembershipEntity, Option<TeamEntity>)) -> Self {
        Self {
            team: team.map(TeamSummary::from),
            pro_goals: membership.pro_goals,
            again_goals: membership.again_goals,
            difference_goals: membership.difference_goals,
            team_points: membership.team_points,
            won_matches: membership.won_matches,
            tied_matches: membership.tied_matches,
            lost_matches: membership.lost_matches,
            played_matches: membership.played_matches,
        }
    }
}

/// Projection of a tournament with roster entries kept as references.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner: Uuid,
    pub teams: Vec<MembershipSummary>,
    pub journeys: Vec<Uuid>,
}

impl From<TournamentEntity> for TournamentSummary {
    fn from(value: TournamentEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            owner: value.owner,
            teams: value.teams.into_iter().map(Into::into).collect(),
            journeys: value.journeys,
        }
    }
}

/// Projection of a tournament with every roster entry expanded to its full
/// team record.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner: Uuid,
    pub teams: Vec<ResolvedMembership>,
    pub journeys: Vec<Uuid>,
}

/// Envelope carrying one tournament, with a message on mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub tournament: TournamentSummary,
}

/// Every tournament visible to the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentsResponse {
    pub tournaments: Vec<TournamentSummary>,
}

/// Envelope for the roster-mutating route that answers with an expanded
/// tournament.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentDetailResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub tournament: TournamentDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_body_accepts_a_missing_team_id() {
        let request: MembershipRequest = serde_json::from_str("{}").unwrap();
        assert!(request.team_id.is_none());

        let id = Uuid::new_v4();
        let body = format!(r#"{{"teamId": "{id}"}}"#);
        let request: MembershipRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(request.team_id, Some(id));
    }

    #[test]
    fn roster_counters_serialize_in_camel_case() {
        let membership = TeamMembershipEntity::new(Uuid::new_v4());
        let json = serde_json::to_value(MembershipSummary::from(membership)).unwrap();

        assert_eq!(json["proGoals"], 0);
        assert_eq!(json["againGoals"], 0);
        assert_eq!(json["teamPoints"], 0);
        assert!(json.get("pro_goals").is_none());
    }
}
