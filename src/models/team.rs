//! Team model and team administration request/response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A member entry inside a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

/// A team with its roster.
///
/// The roster is derived from the users collection; the team row itself only
/// reserves the name. Members are always listed in ascending user_id order,
/// which is the roster order reviewer selection works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

/// Response wrapper for a single team.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team: Team,
}
