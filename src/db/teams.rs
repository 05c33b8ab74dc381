//! Postgres-backed teams store.
//!
//! The `teams` table only reserves names; rosters are derived from
//! `users.team_name`. Team creation and member upserts run in a single
//! transaction so a duplicate name never leaves partial member rows behind.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    SqlErr, TransactionTrait,
};

use crate::entity::{team, user};
use crate::error::{AppError, AppResult};
use crate::models::{Team, TeamMember};
use crate::store::TeamStore;

/// Teams collection backed by the `teams` and `users` tables.
#[derive(Clone)]
pub struct PgTeamStore {
    db: DatabaseConnection,
}

impl PgTeamStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn roster(&self, team_name: &str) -> AppResult<Vec<TeamMember>> {
        let rows = user::Entity::find()
            .filter(user::Column::TeamName.eq(team_name))
            .order_by_asc(user::Column::UserId)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|m| TeamMember {
                user_id: m.user_id,
                username: m.username,
                is_active: m.is_active,
            })
            .collect())
    }
}

#[async_trait]
impl TeamStore for PgTeamStore {
    async fn create(&self, new_team: Team) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let insert = team::Entity::insert(team::ActiveModel {
            team_name: Set(new_team.team_name.clone()),
        })
        .exec(&txn)
        .await;

        if let Err(err) = insert {
            return match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::TeamExists(new_team.team_name))
                }
                _ => Err(err.into()),
            };
        }

        for member in &new_team.members {
            user::Entity::insert(user::ActiveModel {
                user_id: Set(member.user_id.clone()),
                username: Set(member.username.clone()),
                team_name: Set(Some(new_team.team_name.clone())),
                is_active: Set(member.is_active),
            })
            .on_conflict(
                OnConflict::column(user::Column::UserId)
                    .update_columns([
                        user::Column::Username,
                        user::Column::TeamName,
                        user::Column::IsActive,
                    ])
                    .to_owned(),
            )
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn get_by_name(&self, team_name: &str) -> AppResult<Team> {
        let members = self.roster(team_name).await?;
        if members.is_empty() {
            return Err(AppError::NotFound(format!("team {}", team_name)));
        }
        Ok(Team {
            team_name: team_name.to_string(),
            members,
        })
    }

    async fn list_all(&self) -> AppResult<Vec<Team>> {
        let names: Vec<Option<String>> = user::Entity::find()
            .select_only()
            .column(user::Column::TeamName)
            .distinct()
            .filter(user::Column::TeamName.is_not_null())
            .order_by_asc(user::Column::TeamName)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut teams = Vec::new();
        for name in names.into_iter().flatten() {
            let members = self.roster(&name).await?;
            if members.is_empty() {
                continue;
            }
            teams.push(Team {
                team_name: name,
                members,
            });
        }
        Ok(teams)
    }
}
