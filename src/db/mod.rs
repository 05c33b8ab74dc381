//! Database module providing connection management and the Postgres-backed
//! storage ports.

pub mod pull_requests;
pub mod teams;
pub mod users;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use crate::config::Config;
use crate::error::AppResult;

pub use pull_requests::PgPullRequestStore;
pub use teams::PgTeamStore;
pub use users::PgUserStore;

/// Open a connection pool from configuration.
pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(10)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Ok(db)
}
