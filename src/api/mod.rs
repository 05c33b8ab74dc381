//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod pull_requests;
pub mod stats;
pub mod teams;
pub mod users;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use pull_requests::configure_routes as configure_pull_request_routes;
pub use stats::configure_routes as configure_stats_routes;
pub use teams::configure_routes as configure_team_routes;
pub use users::configure_routes as configure_user_routes;
