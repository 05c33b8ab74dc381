//! PR lifecycle, team administration, and statistics.
//!
//! `ReviewService` is the operation surface exposed to the HTTP layer. It
//! holds the three storage ports and applies the assignment policy; all
//! mutation goes read-modify-write through the ports, so a failed persist
//! leaves the stored state untouched.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{PrStatus, PullRequest, Stats, Team, User};
use crate::services::assignment;
use crate::store::{PullRequestStore, TeamStore, UserStore};

/// The review-assignment engine.
#[derive(Clone)]
pub struct ReviewService {
    users: Arc<dyn UserStore>,
    teams: Arc<dyn TeamStore>,
    prs: Arc<dyn PullRequestStore>,
}

impl ReviewService {
    pub fn new(
        users: Arc<dyn UserStore>,
        teams: Arc<dyn TeamStore>,
        prs: Arc<dyn PullRequestStore>,
    ) -> Self {
        Self { users, teams, prs }
    }

    /// Roster of the author's team. An author without a team has an empty
    /// roster and gets no reviewers.
    async fn roster_for_author(&self, author: &User) -> AppResult<Vec<User>> {
        match &author.team_name {
            Some(team_name) => self.users.list_by_team(team_name).await,
            None => Ok(Vec::new()),
        }
    }

    /// Create a pull request with up to two automatically assigned reviewers.
    ///
    /// Fails `PrExists` on a duplicate id (surfaced from the storage
    /// unique-key constraint) and `NotFound` when the author does not exist
    /// or the team roster cannot be read.
    pub async fn create_pr(
        &self,
        pull_request_id: String,
        pull_request_name: String,
        author_id: String,
    ) -> AppResult<PullRequest> {
        let author = self.users.get_by_id(&author_id).await?;
        let roster = self.roster_for_author(&author).await?;
        let reviewers = assignment::select_initial_reviewers(&author_id, &roster);

        let pr = PullRequest {
            pull_request_id,
            pull_request_name,
            author_id,
            status: PrStatus::Open,
            assigned_reviewers: reviewers,
            created_at: Utc::now(),
            merged_at: None,
            version: 0,
        };
        self.prs.create(pr.clone()).await?;

        info!(
            pull_request_id = %pr.pull_request_id,
            author_id = %pr.author_id,
            reviewers = ?pr.assigned_reviewers,
            "Pull request created"
        );
        Ok(pr)
    }

    /// Merge a pull request. Idempotent: merging an already-merged PR
    /// returns the stored record unchanged, without re-stamping `merged_at`.
    pub async fn merge_pr(&self, pull_request_id: &str) -> AppResult<PullRequest> {
        let mut pr = self.prs.get_by_id(pull_request_id).await?;
        if pr.status == PrStatus::Merged {
            return Ok(pr);
        }

        pr.status = PrStatus::Merged;
        pr.merged_at = Some(Utc::now());
        let merged = self.prs.update(pr).await?;

        info!(pull_request_id = %merged.pull_request_id, "Pull request merged");
        Ok(merged)
    }

    /// Replace `old_user_id` on an open pull request with the first eligible
    /// team member. Returns the updated PR and the replacement's id.
    pub async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> AppResult<(PullRequest, String)> {
        let mut pr = self.prs.get_by_id(pull_request_id).await?;
        if pr.status == PrStatus::Merged {
            return Err(AppError::PrMerged(pull_request_id.to_string()));
        }

        let position = pr
            .assigned_reviewers
            .iter()
            .position(|r| r == old_user_id)
            .ok_or_else(|| {
                AppError::NotAssigned(old_user_id.to_string(), pull_request_id.to_string())
            })?;
        pr.assigned_reviewers.remove(position);

        let author = self.users.get_by_id(&pr.author_id).await?;
        let roster = self.roster_for_author(&author).await?;
        let replacement = assignment::select_replacement(
            &pr.author_id,
            &pr.assigned_reviewers,
            old_user_id,
            &roster,
        )
        .ok_or_else(|| AppError::NoCandidate(pull_request_id.to_string()))?;

        pr.assigned_reviewers.push(replacement.clone());
        let updated = self.prs.update(pr).await?;

        info!(
            pull_request_id = %updated.pull_request_id,
            old_user_id = %old_user_id,
            replaced_by = %replacement,
            "Reviewer reassigned"
        );
        Ok((updated, replacement))
    }

    /// Deactivate every member of a team.
    ///
    /// Best-effort bulk update: each user is persisted individually and the
    /// first persistence error aborts without rolling back prior updates, so
    /// partial completion is a possible outcome.
    pub async fn deactivate_team(&self, team_name: &str) -> AppResult<()> {
        let members = self.users.list_by_team(team_name).await?;
        let total = members.len();
        for mut member in members {
            member.is_active = false;
            self.users.update(member).await?;
        }

        info!(team_name = %team_name, members = total, "Team deactivated");
        Ok(())
    }

    /// Aggregate statistics over all pull requests and users.
    ///
    /// Read-only recomputation on demand; the two list reads are sequential,
    /// so consistency across the collections is best-effort.
    pub async fn get_stats(&self) -> AppResult<Stats> {
        let prs = self.prs.list_all().await?;
        let users = self.users.list_all().await?;

        let open_prs = prs.iter().filter(|p| p.status == PrStatus::Open).count() as u64;
        let merged_prs = prs.iter().filter(|p| p.status == PrStatus::Merged).count() as u64;
        let active_users = users.iter().filter(|u| u.is_active).count() as u64;
        let total_reviewers: usize = prs.iter().map(|p| p.assigned_reviewers.len()).sum();

        let average_reviewers = if prs.is_empty() {
            0.0
        } else {
            total_reviewers as f64 / prs.len() as f64
        };

        Ok(Stats {
            total_prs: prs.len() as u64,
            total_users: users.len() as u64,
            open_prs,
            merged_prs,
            active_users,
            average_reviewers,
        })
    }

    /// Create a team with its initial members.
    pub async fn create_team(&self, team: Team) -> AppResult<Team> {
        self.teams.create(team.clone()).await?;
        info!(team_name = %team.team_name, members = team.members.len(), "Team created");
        // Return the stored roster so members appear in roster order.
        match self.teams.get_by_name(&team.team_name).await {
            Ok(stored) => Ok(stored),
            // A team created without members has no derivable roster yet.
            Err(AppError::NotFound(_)) => Ok(team),
            Err(err) => Err(err),
        }
    }

    /// Team with its roster; fails `NotFound` when the team has no members.
    pub async fn get_team(&self, team_name: &str) -> AppResult<Team> {
        self.teams.get_by_name(team_name).await
    }

    /// Direct user creation (outside of team membership).
    pub async fn create_user(&self, user: User) -> AppResult<User> {
        self.users.create(user.clone()).await?;
        info!(user_id = %user.user_id, "User created");
        Ok(user)
    }

    /// Toggle a user's active flag.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> AppResult<User> {
        let mut user = self.users.get_by_id(user_id).await?;
        user.is_active = is_active;
        self.users.update(user.clone()).await?;
        Ok(user)
    }

    /// All pull requests where the user is an assigned reviewer.
    pub async fn reviews_for(&self, user_id: &str) -> AppResult<Vec<PullRequest>> {
        self.prs.list_by_reviewer(user_id).await
    }
}
