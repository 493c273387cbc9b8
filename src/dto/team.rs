//! DTO definitions for the team CRUD surface.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::TeamEntity;

/// Payload for creating a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, message = "the name field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "the description field is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "the country field is required"))]
    pub country: String,
}

/// Partial team update; absent fields stay untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
}

/// Full projection of a team, including its lifetime statistics.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub country: String,
    pub owner: Uuid,
    pub played_matches: i32,
    pub won_matches: i32,
    pub tied_matches: i32,
    pub lost_matches: i32,
    pub pro_goals: i32,
    pub again_goals: i32,
    pub difference_goals: i32,
    pub team_points: i32,
}

impl From<TeamEntity> for TeamSummary {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            country: value.country,
            owner: value.owner,
            played_matches: value.played_matches,
            won_matches: value.won_matches,
            tied_matches: value.tied_matches,
            lost_matches: value.lost_matches,
            pro_goals: value.pro_goals,
            again_goals: value.again_goals,
            difference_goals: value.difference_goals,
            team_points: value.team_points,
        }
    }
}

/// Envelope carrying one team, with a message on mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub team: TeamSummary,
}

/// Every team owned by the calling account.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamsResponse {
    pub teams: Vec<TeamSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_statistics_serialize_in_camel_case() {
        let team = TeamEntity::new(
            "Red Lions".into(),
            "Sunday league".into(),
            "Scotland".into(),
            Uuid::new_v4(),
        );

        let json = serde_json::to_value(TeamSummary::from(team)).unwrap();
        assert_eq!(json["playedMatches"], 0);
        assert_eq!(json["proGoals"], 0);
        assert_eq!(json["differenceGoals"], 0);
        assert!(json.get("played_matches").is_none());
    }
}
