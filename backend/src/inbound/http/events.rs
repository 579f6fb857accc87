//! Event catalogue API handlers.
//!
//! ```text
//! GET    /api/v1/events?search=&category=&department=&date=
//! POST   /api/v1/events
//! PATCH  /api/v1/events/{id}
//! DELETE /api/v1/events/{id}
//! POST   /api/v1/events/{id}/bookmark
//! POST   /api/v1/events/{id}/register
//! GET    /api/v1/me/registrations
//! ```

use actix_web::{delete, get, patch, post, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    DomainError, Event, EventCategory, EventPatch, NewRegistration, RegistrationRow,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Filter selections accepted by the event list.
///
/// Present parameters replace the stored selections; absent ones clear
/// them, so a plain `GET /events` lists everything.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EventFilters {
    pub search: Option<String>,
    pub category: Option<EventCategory>,
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Form submitted when registering for an event.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// List events matching the filter selections.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(EventFilters),
    responses((status = 200, description = "Matching events", body = [Event])),
    tags = ["events"],
    operation_id = "listEvents",
    security([])
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    filters: web::Query<EventFilters>,
) -> HttpResponse {
    let filters = filters.into_inner();
    let mut events = state.events_mut();
    events.set_search_term(filters.search.unwrap_or_default());
    events.set_selected_category(filters.category);
    events.set_selected_department(filters.department);
    events.set_selected_date(filters.date);
    HttpResponse::Ok().json(events.filtered_events())
}

/// Add an event to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = Event,
    responses((status = 201, description = "Event added", body = Event)),
    tags = ["events"],
    operation_id = "addEvent"
)]
#[post("/events")]
pub async fn add_event(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<Event>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let event = payload.into_inner();
    state.events_mut().add_event(event.clone());
    Ok(HttpResponse::Created().json(event))
}

/// Patch an event. Unknown ids are ignored and still return 204.
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    request_body = EventPatch,
    params(("id" = String, Path, description = "Event identifier")),
    responses((status = 204, description = "Patch applied or id unknown")),
    tags = ["events"],
    operation_id = "updateEvent"
)]
#[patch("/events/{id}")]
pub async fn update_event(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<EventPatch>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    state.events_mut().update_event(&id, payload.into_inner());
    Ok(HttpResponse::NoContent().finish())
}

/// Remove an event. Unknown ids are ignored and still return 204.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses((status = 204, description = "Event removed or id unknown")),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    state.events_mut().delete_event(&id);
    Ok(HttpResponse::NoContent().finish())
}

/// Flip the bookmark on an event.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/bookmark",
    params(("id" = String, Path, description = "Event identifier")),
    responses((status = 200, description = "Bookmarked event ids", body = [String])),
    tags = ["events"],
    operation_id = "toggleBookmark"
)]
#[post("/events/{id}/bookmark")]
pub async fn toggle_bookmark(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let mut events = state.events_mut();
    events.toggle_bookmark(&id);
    Ok(HttpResponse::Ok().json(events.bookmarked()))
}

/// Register for an event.
///
/// Records the registration row remotely, marks the user on the event, and
/// refreshes the leaderboard. Capacity and duplicates are not checked here.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/register",
    request_body = RegisterRequest,
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 204, description = "Registration recorded"),
        (status = 404, description = "Unknown event", body = DomainError)
    ),
    tags = ["events"],
    operation_id = "registerForEvent"
)]
#[post("/events/{id}/register")]
pub async fn register_for_event(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let form = payload.into_inner();
    let event_name = {
        let events = state.events();
        events
            .event(&id)
            .map(|e| e.title.clone())
            .ok_or_else(|| DomainError::not_found(format!("unknown event: {id}")))?
    };
    state
        .registrations
        .insert(NewRegistration {
            full_name: form.full_name,
            email: form.email,
            phone: form.phone,
            department: form.department,
            year: form.year,
            message: form.message,
            event_name,
        })
        .await
        .map_err(|error| DomainError::internal(error.to_string()))?;
    state.events_mut().register_for_event(&id, &user_id);
    // Standings update is best effort; the registration itself is recorded.
    if let Err(error) = state.leaderboard.refresh().await {
        warn!(%error, "leaderboard refresh after registration failed");
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Registrations recorded for the signed-in user.
///
/// Resolves the user's email from the auth state and lists the matching
/// rows, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/me/registrations",
    responses(
        (status = 200, description = "Rows recorded for the signed-in user", body = [RegistrationRow]),
        (status = 401, description = "Not signed in", body = DomainError)
    ),
    tags = ["events"],
    operation_id = "myRegistrations"
)]
#[get("/me/registrations")]
pub async fn my_registrations(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let email = state
        .auth()
        .user()
        .map(|user| user.email.clone())
        .ok_or_else(|| DomainError::unauthorized("sign in required"))?;
    let rows = state
        .registrations
        .list_by_email(&email)
        .await
        .map_err(|error| DomainError::internal(error.to_string()))?;
    Ok(HttpResponse::Ok().json(rows))
}
