//! Leaderboard API handler.

use actix_web::{get, web, HttpResponse};

use crate::domain::{DomainError, LeaderboardEntry};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Current leaderboard standings.
///
/// Refreshes from the registration collection; when the refresh is
/// superseded by a newer one mid-flight, the newest published standings
/// are returned instead.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    responses(
        (status = 200, description = "Standings, points descending", body = [LeaderboardEntry]),
        (status = 500, description = "Registration store unreachable", body = DomainError)
    ),
    tags = ["leaderboard"],
    operation_id = "leaderboard",
    security([])
)]
#[get("/leaderboard")]
pub async fn standings(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = match state.leaderboard.refresh().await? {
        Some(entries) => entries,
        None => state.leaderboard.current(),
    };
    Ok(HttpResponse::Ok().json(entries))
}
