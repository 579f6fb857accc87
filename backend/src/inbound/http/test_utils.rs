//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use std::sync::Arc;

use crate::domain::ports::{
    FixtureAuthGateway, FixtureRegistrationRepository, FixtureStateRepository,
    FixtureUserDirectory, RegistrationRepository, FIXTURE_EMAIL, FIXTURE_PASSWORD,
};
use crate::domain::{
    catalog, AccountService, AuthStore, EventStore, LeaderboardService, NewRegistration,
    ServiceAvailability,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::trace::Trace;

/// Session middleware with a throwaway key and the `Secure` flag off for
/// plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State wired entirely from fixtures, seeded with the demo catalogue.
pub fn fixture_state() -> HttpState {
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
    events.set_venues(seed_venues);
    HttpState::new(accounts, leaderboard, registrations, auth, events)
}

/// A full API app over fixture state, plus the state for assertions.
pub async fn test_app() -> (
    impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    HttpState,
) {
    let state = fixture_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(test_session_middleware())
            .wrap(Trace)
            .service(super::api_scope()),
    )
    .await;
    (app, state)
}

/// Sign in with the fixture credentials and return the session cookie.
pub async fn signed_in_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(serde_json::json!({
            "email": FIXTURE_EMAIL,
            "password": FIXTURE_PASSWORD,
        }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "fixture login failed");
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Seed registration rows as `(email, full name)` pairs.
pub async fn register_fixture_rows(state: &HttpState, rows: &[(&str, &str)]) {
    for (email, name) in rows {
        state
            .registrations
            .insert(NewRegistration {
                full_name: (*name).to_owned(),
                email: (*email).to_owned(),
                phone: None,
                department: None,
                year: None,
                message: None,
                event_name: "TechFest 2025".to_owned(),
            })
            .await
            .expect("fixture insert succeeds");
    }
}
