//! Venue API handlers.
//!
//! ```text
//! GET /api/v1/venues
//! GET /api/v1/venues/{id}/availability?date=2025-03-15&start=10:00&end=12:00
//! ```

use actix_web::{get, web, HttpResponse};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Venue};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Requested slot, times in `HH:MM`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
}

/// Availability verdict for a venue and slot.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
}

fn parse_slot_time(value: &str, field: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        DomainError::invalid_request(format!("{field} must be HH:MM"))
            .with_details(serde_json::json!({ "field": field }))
    })
}

/// List venues with their bookings.
#[utoipa::path(
    get,
    path = "/api/v1/venues",
    responses((status = 200, description = "Known venues", body = [Venue])),
    tags = ["venues"],
    operation_id = "listVenues",
    security([])
)]
#[get("/venues")]
pub async fn list_venues(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok().json(state.events().venues())
}

/// Whether a venue is free for the half-open slot `[start, end)`.
#[utoipa::path(
    get,
    path = "/api/v1/venues/{id}/availability",
    params(("id" = String, Path, description = "Venue identifier"), AvailabilityQuery),
    responses(
        (status = 200, description = "Availability verdict", body = AvailabilityResponse),
        (status = 400, description = "Malformed slot", body = DomainError),
        (status = 404, description = "Unknown venue", body = DomainError)
    ),
    tags = ["venues"],
    operation_id = "venueAvailability",
    security([])
)]
#[get("/venues/{id}/availability")]
pub async fn availability(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    query: web::Query<AvailabilityQuery>,
) -> ApiResult<HttpResponse> {
    let start = parse_slot_time(&query.start, "start")?;
    let end = parse_slot_time(&query.end, "end")?;
    if start >= end {
        return Err(DomainError::invalid_request("start must precede end"));
    }
    let available = state
        .events()
        .check_venue_availability(&id, query.date, start, end)?;
    Ok(HttpResponse::Ok().json(AvailabilityResponse { available }))
}
