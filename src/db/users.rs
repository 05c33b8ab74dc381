//! Postgres-backed users store.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::store::UserStore;

/// Users collection backed by the `users` table.
#[derive(Clone)]
pub struct PgUserStore {
    db: DatabaseConnection,
}

impl PgUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_user(m: user::Model) -> User {
    User {
        user_id: m.user_id,
        username: m.username,
        team_name: m.team_name,
        is_active: m.is_active,
    }
}

fn user_to_active_model(u: &User) -> user::ActiveModel {
    user::ActiveModel {
        user_id: Set(u.user_id.clone()),
        username: Set(u.username.clone()),
        team_name: Set(u.team_name.clone()),
        is_active: Set(u.is_active),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: User) -> AppResult<()> {
        // Upsert keyed by user_id, matching team-creation semantics where
        // re-adding a member refreshes the existing row.
        user::Entity::insert(user_to_active_model(&new_user))
            .on_conflict(
                OnConflict::column(user::Column::UserId)
                    .update_columns([
                        user::Column::Username,
                        user::Column::TeamName,
                        user::Column::IsActive,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn get_by_id(&self, user_id: &str) -> AppResult<User> {
        let found = user::Entity::find_by_id(user_id).one(&self.db).await?;
        found
            .map(model_to_user)
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    async fn update(&self, updated: User) -> AppResult<()> {
        let result = user::Entity::update_many()
            .set(user_to_active_model(&updated))
            .filter(user::Column::UserId.eq(&updated.user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("user {}", updated.user_id)));
        }
        Ok(())
    }

    async fn list_by_team(&self, team_name: &str) -> AppResult<Vec<User>> {
        let rows = user::Entity::find()
            .filter(user::Column::TeamName.eq(team_name))
            .order_by_asc(user::Column::UserId)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(model_to_user).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::UserId)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(model_to_user).collect())
    }
}
