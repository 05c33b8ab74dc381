//! Statistics API handler.

use actix_web::{HttpResponse, get, web};

use crate::error::AppResult;
use crate::models::StatsResponse;
use crate::services::ReviewService;

/// Aggregate statistics over all pull requests and users.
///
/// Recomputed on demand from the two collections; no cached counters.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Aggregate review statistics", body = StatsResponse),
    )
)]
#[get("/stats")]
pub async fn get_stats(service: web::Data<ReviewService>) -> AppResult<HttpResponse> {
    let stats = service.get_stats().await?;
    Ok(HttpResponse::Ok().json(StatsResponse { stats }))
}

/// Configure stats routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_stats);
}
