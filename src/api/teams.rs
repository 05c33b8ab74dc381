//! Team API handlers.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{Team, TeamResponse};
use crate::services::ReviewService;

/// Query parameters for GET /team/get.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GetTeamQuery {
    pub team_name: String,
}

/// Create a team with its initial members.
///
/// Member rows are upserted in one transaction; the roster in the response
/// is in ascending user_id order.
#[utoipa::path(
    post,
    path = "/team/add",
    tag = "Teams",
    request_body = Team,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Team name already exists", body = crate::error::ErrorResponse),
    )
)]
#[post("/team/add")]
pub async fn add_team(
    service: web::Data<ReviewService>,
    body: web::Json<Team>,
) -> AppResult<HttpResponse> {
    let team = body.into_inner();
    if team.team_name.is_empty() {
        return Err(AppError::InvalidInput("team_name required".to_string()));
    }

    let created = service.create_team(team).await?;
    info!(team_name = %created.team_name, "Team registered");

    Ok(HttpResponse::Created().json(TeamResponse { team: created }))
}

/// Get a team with its roster.
#[utoipa::path(
    get,
    path = "/team/get",
    tag = "Teams",
    params(
        ("team_name" = String, Query, description = "Team name")
    ),
    responses(
        (status = 200, description = "Team with roster", body = Team),
        (status = 400, description = "Missing team_name", body = crate::error::ErrorResponse),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse),
    )
)]
#[get("/team/get")]
pub async fn get_team(
    service: web::Data<ReviewService>,
    query: web::Query<GetTeamQuery>,
) -> AppResult<HttpResponse> {
    if query.team_name.is_empty() {
        return Err(AppError::InvalidInput("team_name required".to_string()));
    }

    let team = service.get_team(&query.team_name).await?;
    Ok(HttpResponse::Ok().json(team))
}

/// Configure team routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(add_team).service(get_team);
}
