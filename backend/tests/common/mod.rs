//! Shared wiring for integration tests: a full app over fixture adapters.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use actix_http::Request;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use std::sync::Arc;

use backend::domain::ports::{
    FixtureAuthGateway, FixtureRegistrationRepository, FixtureStateRepository,
    FixtureUserDirectory, RegistrationRepository,
};
use backend::domain::{
    catalog, AccountService, AuthStore, EventStore, LeaderboardService, ServiceAvailability, Venue,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::api_scope;
use backend::Trace;

/// Fixture-backed state seeded with the demo catalogue.
pub fn fixture_state() -> HttpState {
    state_with_venues(None)
}

/// Fixture-backed state with the venue list replaced when supplied.
pub fn state_with_venues(venues: Option<Vec<Venue>>) -> HttpState {
    let registrations: Arc<dyn RegistrationRepository> =
        Arc::new(FixtureRegistrationRepository::new());
    let accounts = Arc::new(AccountService::new(
        Arc::new(FixtureAuthGateway::new()),
        Arc::new(FixtureUserDirectory::new()),
        ServiceAvailability::configured(),
    ));
    let leaderboard = Arc::new(LeaderboardService::new(Arc::clone(&registrations)));
    let auth = AuthStore::restore(Arc::new(FixtureStateRepository::new()));
    let mut events = EventStore::new();
    let (seed_events, seed_venues) = catalog::demo_catalogue();
    events.set_events(seed_events);
    events.set_venues(venues.unwrap_or(seed_venues));
    HttpState::new(accounts, leaderboard, registrations, auth, events)
}

/// Initialise the service with its session and trace middleware.
pub async fn spawn_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_name("session".to_owned())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

/// Extract the session cookie from a response.
pub fn session_cookie(res: &ServiceResponse<BoxBody>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
