//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{
    AuthGateway, FixtureAuthGateway, FixtureRealtimeFeed, FixtureRegistrationRepository,
    FixtureUserDirectory, RealtimeFeed, RegistrationRepository, UserDirectory,
};
use backend::domain::{
    catalog, AccountService, AuthStore, EventStore, LeaderboardService,
};
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::HttpState;
use backend::inbound::{http, ws};
use backend::outbound::persistence::FileStateRepository;
use backend::outbound::remote::{PollingRealtimeFeed, RemoteDataService};
use backend::Trace;

/// Driven-side adapters selected from the configuration.
struct Adapters {
    registrations: Arc<dyn RegistrationRepository>,
    directory: Arc<dyn UserDirectory>,
    gateway: Arc<dyn AuthGateway>,
    realtime: Arc<dyn RealtimeFeed>,
}

/// Pick remote adapters when configured, fixtures otherwise.
fn build_adapters(config: &ServerConfig) -> std::io::Result<Adapters> {
    if let Some((url, anon_key)) = config.remote.credentials() {
        info!(endpoint = %url, "using the hosted remote data service");
        let service = Arc::new(
            RemoteDataService::new(url, anon_key)
                .map_err(|e| std::io::Error::other(format!("http client: {e}")))?,
        );
        return Ok(Adapters {
            registrations: Arc::clone(&service) as Arc<dyn RegistrationRepository>,
            directory: Arc::clone(&service) as Arc<dyn UserDirectory>,
            gateway: Arc::clone(&service) as Arc<dyn AuthGateway>,
            realtime: Arc::new(PollingRealtimeFeed::new(service)),
        });
    }
    warn!(
        missing = ?config.remote.missing(),
        "remote data service not configured; using in-memory fixtures"
    );
    Ok(Adapters {
        registrations: Arc::new(FixtureRegistrationRepository::new()),
        directory: Arc::new(FixtureUserDirectory::new()),
        gateway: Arc::new(FixtureAuthGateway::new()),
        realtime: Arc::new(FixtureRealtimeFeed::new()),
    })
}

fn build_http_state(config: &ServerConfig, adapters: &Adapters) -> HttpState {
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&adapters.gateway),
        Arc::clone(&adapters.directory),
        config.remote.availability(),
    ));
    let leaderboard = Arc::new(LeaderboardService::new(Arc::clone(&adapters.registrations)));
    let auth = AuthStore::restore(Arc::new(FileStateRepository::new(&config.state_path)));
    let mut events = EventStore::new();
    let (seed_events, seed_venues) = catalog::demo_catalogue();
    events.set_events(seed_events);
    events.set_venues(seed_venues);
    HttpState::new(
        accounts,
        leaderboard,
        Arc::clone(&adapters.registrations),
        auth,
        events,
    )
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build()
}

/// Construct the HTTP server and start the leaderboard refresh loop.
///
/// # Errors
/// Propagates [`std::io::Error`] when the HTTP client cannot be built or
/// the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let adapters = build_adapters(&config)?;
    let http_state = web::Data::new(build_http_state(&config, &adapters));

    actix_web::rt::spawn(
        Arc::clone(&http_state.leaderboard).run(Arc::clone(&adapters.realtime)),
    );

    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        let api = http::api_scope().wrap(session_middleware(
            key.clone(),
            cookie_secure,
            same_site,
        ));

        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ws::leaderboard_feed)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
