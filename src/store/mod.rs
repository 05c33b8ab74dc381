//! Storage ports consumed by the review engine.
//!
//! Three independent collections, each addressable by primary key. The
//! Postgres implementations live in [`crate::db`]; [`memory`] provides an
//! in-memory implementation used by tests.

pub mod memory;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{PullRequest, Team, User};

/// Users collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create or update a user keyed by user_id.
    async fn create(&self, user: User) -> AppResult<()>;

    /// Fetch a user; fails `NotFound` when absent.
    async fn get_by_id(&self, user_id: &str) -> AppResult<User>;

    /// Update an existing user; fails `NotFound` when absent.
    async fn update(&self, user: User) -> AppResult<()>;

    /// All users whose team_name matches, in ascending user_id order.
    async fn list_by_team(&self, team_name: &str) -> AppResult<Vec<User>>;

    /// All users.
    async fn list_all(&self) -> AppResult<Vec<User>>;
}

/// Teams collection.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Create a team and upsert its members; fails `TeamExists` when the
    /// name is taken.
    async fn create(&self, team: Team) -> AppResult<()>;

    /// Team with its roster in ascending user_id order; fails `NotFound`
    /// when the team has no members.
    async fn get_by_name(&self, team_name: &str) -> AppResult<Team>;

    /// All teams that have at least one member.
    async fn list_all(&self) -> AppResult<Vec<Team>>;
}

/// Pull requests collection.
#[async_trait]
pub trait PullRequestStore: Send + Sync {
    /// Insert a new pull request; fails `PrExists` on a duplicate id.
    async fn create(&self, pr: PullRequest) -> AppResult<()>;

    /// Fetch a pull request; fails `NotFound` when absent.
    async fn get_by_id(&self, pull_request_id: &str) -> AppResult<PullRequest>;

    /// Compare-and-swap update keyed by (id, version). Returns the stored
    /// record with its version bumped. Fails `NotFound` when the row is
    /// absent and `Conflict` when the version check fails.
    async fn update(&self, pr: PullRequest) -> AppResult<PullRequest>;

    /// All pull requests where the user is in the assigned reviewer set.
    async fn list_by_reviewer(&self, user_id: &str) -> AppResult<Vec<PullRequest>>;

    /// All pull requests.
    async fn list_all(&self) -> AppResult<Vec<PullRequest>>;
}
