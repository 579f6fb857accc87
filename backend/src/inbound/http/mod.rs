//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod events;
pub mod health;
pub mod leaderboard;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod venues;

pub use error::ApiResult;

use actix_web::{web, Scope};

/// Every `/api/v1` route. The caller supplies [`state::HttpState`] as app
/// data and wraps the session middleware around the scope or the app.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::me)
        .service(auth::update_me)
        .service(auth::toggle_theme)
        .service(events::list_events)
        .service(events::add_event)
        .service(events::update_event)
        .service(events::delete_event)
        .service(events::toggle_bookmark)
        .service(events::register_for_event)
        .service(events::my_registrations)
        .service(leaderboard::standings)
        .service(venues::list_venues)
        .service(venues::availability)
}
