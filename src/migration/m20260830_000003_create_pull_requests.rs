//! Migration: Create pull_requests table.
//!
//! The primary key enforces exactly-once creation; the version column backs
//! the compare-and-swap updates used for reassignment and merging.

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
                CREATE TABLE pull_requests (
                    pull_request_id VARCHAR(100) PRIMARY KEY,
                    pull_request_name VARCHAR(500) NOT NULL,
                    author_id VARCHAR(100) NOT NULL REFERENCES users(user_id),
                    status VARCHAR(20) NOT NULL
                        CHECK (status IN ('OPEN', 'MERGED')),
                    assigned_reviewers JSONB NOT NULL DEFAULT '[]'::jsonb,
                    created_at TIMESTAMPTZ NOT NULL,
                    merged_at TIMESTAMPTZ,
                    version BIGINT NOT NULL DEFAULT 0
                );

                -- Listings are newest-first
                CREATE INDEX idx_pull_requests_created_at
                    ON pull_requests(created_at DESC);

                -- Reviewer containment queries (assigned_reviewers @> ...)
                CREATE INDEX idx_pull_requests_reviewers
                    ON pull_requests USING GIN (assigned_reviewers);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS pull_requests CASCADE;")
            .await?;

        Ok(())
    }
}
