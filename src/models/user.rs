//! User model and user administration request/response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A tracked user. Team membership is a nullable reference to a team name;
/// users are never hard-deleted, only deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

/// Request body for POST /users/setIsActive.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetIsActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

/// Request body for POST /users/deactivateTeam.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeactivateTeamRequest {
    pub team_name: String,
}

/// Response wrapper for a single user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}
