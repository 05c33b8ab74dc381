//! Postgres-backed pull requests store.
//!
//! Duplicate ids surface as `PrExists` straight from the primary-key
//! constraint, and updates are compare-and-swap on the `version` column, so
//! concurrent writers never need an in-process lock.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::entity::pull_request;
use crate::error::{AppError, AppResult};
use crate::models::{PrStatus, PullRequest};
use crate::store::PullRequestStore;

/// Pull requests collection backed by the `pull_requests` table.
#[derive(Clone)]
pub struct PgPullRequestStore {
    db: DatabaseConnection,
}

impl PgPullRequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_pr(m: pull_request::Model) -> AppResult<PullRequest> {
    let status = PrStatus::parse(&m.status).ok_or_else(|| {
        AppError::Database(format!(
            "pull request {} has invalid status '{}'",
            m.pull_request_id, m.status
        ))
    })?;
    let assigned_reviewers: Vec<String> =
        serde_json::from_value(m.assigned_reviewers).map_err(|e| {
            AppError::Database(format!(
                "pull request {} has invalid reviewer list: {}",
                m.pull_request_id, e
            ))
        })?;

    Ok(PullRequest {
        pull_request_id: m.pull_request_id,
        pull_request_name: m.pull_request_name,
        author_id: m.author_id,
        status,
        assigned_reviewers,
        created_at: m.created_at,
        merged_at: m.merged_at,
        version: m.version,
    })
}

fn pr_to_active_model(pr: &PullRequest, version: i64) -> pull_request::ActiveModel {
    pull_request::ActiveModel {
        pull_request_id: Set(pr.pull_request_id.clone()),
        pull_request_name: Set(pr.pull_request_name.clone()),
        author_id: Set(pr.author_id.clone()),
        status: Set(pr.status.as_str().to_string()),
        assigned_reviewers: Set(serde_json::json!(pr.assigned_reviewers)),
        created_at: Set(pr.created_at),
        merged_at: Set(pr.merged_at),
        version: Set(version),
    }
}

#[async_trait]
impl PullRequestStore for PgPullRequestStore {
    async fn create(&self, pr: PullRequest) -> AppResult<()> {
        let result = pull_request::Entity::insert(pr_to_active_model(&pr, 0))
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::PrExists(pr.pull_request_id))
                }
                _ => Err(err.into()),
            },
        }
    }

    async fn get_by_id(&self, pull_request_id: &str) -> AppResult<PullRequest> {
        let found = pull_request::Entity::find_by_id(pull_request_id)
            .one(&self.db)
            .await?;
        match found {
            Some(model) => model_to_pr(model),
            None => Err(AppError::NotFound(format!(
                "pull request {}",
                pull_request_id
            ))),
        }
    }

    async fn update(&self, pr: PullRequest) -> AppResult<PullRequest> {
        let result = pull_request::Entity::update_many()
            .set(pr_to_active_model(&pr, pr.version + 1))
            .filter(pull_request::Column::PullRequestId.eq(&pr.pull_request_id))
            .filter(pull_request::Column::Version.eq(pr.version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            // Either the row is gone or someone else bumped the version.
            let exists = pull_request::Entity::find_by_id(&pr.pull_request_id)
                .one(&self.db)
                .await?
                .is_some();
            return if exists {
                Err(AppError::Conflict(pr.pull_request_id))
            } else {
                Err(AppError::NotFound(format!(
                    "pull request {}",
                    pr.pull_request_id
                )))
            };
        }

        let mut updated = pr;
        updated.version += 1;
        Ok(updated)
    }

    async fn list_by_reviewer(&self, user_id: &str) -> AppResult<Vec<PullRequest>> {
        let rows = pull_request::Entity::find()
            .filter(Expr::cust_with_values(
                "assigned_reviewers @> ?",
                [serde_json::json!([user_id])],
            ))
            .order_by_desc(pull_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        rows.into_iter().map(model_to_pr).collect()
    }

    async fn list_all(&self) -> AppResult<Vec<PullRequest>> {
        let rows = pull_request::Entity::find()
            .order_by_desc(pull_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        rows.into_iter().map(model_to_pr).collect()
    }
}
