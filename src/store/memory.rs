//! In-memory storage backend.
//!
//! Implements all three storage ports over HashMaps behind a std RwLock.
//! Used by unit and integration tests; behavior mirrors the Postgres
//! implementation, including uniqueness violations and the optimistic
//! version check on pull request updates.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{PullRequest, Team, TeamMember, User};
use crate::store::{PullRequestStore, TeamStore, UserStore};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    teams: Vec<String>,
    prs: HashMap<String, PullRequest>,
}

/// Shared in-memory store backing all three collections.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn roster_of(inner: &Inner, team_name: &str) -> Vec<User> {
        let mut members: Vec<User> = inner
            .users
            .values()
            .filter(|u| u.team_name.as_deref() == Some(team_name))
            .cloned()
            .collect();
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        members
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: User) -> AppResult<()> {
        self.write().users.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn get_by_id(&self, user_id: &str) -> AppResult<User> {
        self.read()
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    async fn update(&self, user: User) -> AppResult<()> {
        let mut inner = self.write();
        match inner.users.get_mut(&user.user_id) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("user {}", user.user_id))),
        }
    }

    async fn list_by_team(&self, team_name: &str) -> AppResult<Vec<User>> {
        Ok(Self::roster_of(&self.read(), team_name))
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.read().users.values().cloned().collect();
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(users)
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn create(&self, team: Team) -> AppResult<()> {
        let mut inner = self.write();
        if inner.teams.iter().any(|t| t == &team.team_name) {
            return Err(AppError::TeamExists(team.team_name));
        }
        inner.teams.push(team.team_name.clone());
        for member in team.members {
            inner.users.insert(
                member.user_id.clone(),
                User {
                    user_id: member.user_id,
                    username: member.username,
                    team_name: Some(team.team_name.clone()),
                    is_active: member.is_active,
                },
            );
        }
        Ok(())
    }

    async fn get_by_name(&self, team_name: &str) -> AppResult<Team> {
        let members = Self::roster_of(&self.read(), team_name);
        if members.is_empty() {
            return Err(AppError::NotFound(format!("team {}", team_name)));
        }
        Ok(Team {
            team_name: team_name.to_string(),
            members: members
                .into_iter()
                .map(|u| TeamMember {
                    user_id: u.user_id,
                    username: u.username,
                    is_active: u.is_active,
                })
                .collect(),
        })
    }

    async fn list_all(&self) -> AppResult<Vec<Team>> {
        let inner = self.read();
        let mut names: Vec<String> = inner
            .users
            .values()
            .filter_map(|u| u.team_name.clone())
            .collect();
        names.sort();
        names.dedup();

        let mut teams = Vec::with_capacity(names.len());
        for name in names {
            let members = Self::roster_of(&inner, &name);
            teams.push(Team {
                team_name: name,
                members: members
                    .into_iter()
                    .map(|u| TeamMember {
                        user_id: u.user_id,
                        username: u.username,
                        is_active: u.is_active,
                    })
                    .collect(),
            });
        }
        Ok(teams)
    }
}

#[async_trait]
impl PullRequestStore for MemoryStore {
    async fn create(&self, pr: PullRequest) -> AppResult<()> {
        let mut inner = self.write();
        if inner.prs.contains_key(&pr.pull_request_id) {
            return Err(AppError::PrExists(pr.pull_request_id));
        }
        inner.prs.insert(pr.pull_request_id.clone(), pr);
        Ok(())
    }

    async fn get_by_id(&self, pull_request_id: &str) -> AppResult<PullRequest> {
        self.read()
            .prs
            .get(pull_request_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("pull request {}", pull_request_id)))
    }

    async fn update(&self, pr: PullRequest) -> AppResult<PullRequest> {
        let mut inner = self.write();
        let existing = inner
            .prs
            .get_mut(&pr.pull_request_id)
            .ok_or_else(|| AppError::NotFound(format!("pull request {}", pr.pull_request_id)))?;
        if existing.version != pr.version {
            return Err(AppError::Conflict(pr.pull_request_id));
        }
        let mut updated = pr;
        updated.version += 1;
        *existing = updated.clone();
        Ok(updated)
    }

    async fn list_by_reviewer(&self, user_id: &str) -> AppResult<Vec<PullRequest>> {
        let mut prs: Vec<PullRequest> = self
            .read()
            .prs
            .values()
            .filter(|pr| pr.assigned_reviewers.iter().any(|r| r == user_id))
            .cloned()
            .collect();
        prs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(prs)
    }

    async fn list_all(&self) -> AppResult<Vec<PullRequest>> {
        let mut prs: Vec<PullRequest> = self.read().prs.values().cloned().collect();
        prs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(prs)
    }
}
