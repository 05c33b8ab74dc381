//! SeaORM entities for the users, teams, and pull_requests tables.

pub mod pull_request;
pub mod team;
pub mod user;
