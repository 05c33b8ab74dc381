//! Migration: Create users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE users (
                    user_id VARCHAR(100) PRIMARY KEY,
                    username VARCHAR(255) NOT NULL,
                    team_name VARCHAR(100),
                    is_active BOOLEAN NOT NULL DEFAULT TRUE
                );

                -- Roster lookups go through team_name
                CREATE INDEX idx_users_team_name
                    ON users(team_name)
                    WHERE team_name IS NOT NULL;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS users CASCADE;")
            .await?;

        Ok(())
    }
}
