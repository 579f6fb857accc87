//! OpenAPI documentation configuration.
//!
//! Generates the REST API specification consumed by Swagger UI in debug
//! builds. Domain types derive `ToSchema` directly, so the schema list
//! references them without wrapper types.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PlanIt backend API",
        description = "Campus event management: auth, events, venues, and the live leaderboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::update_me,
        crate::inbound::http::auth::toggle_theme,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::add_event,
        crate::inbound::http::events::update_event,
        crate::inbound::http::events::delete_event,
        crate::inbound::http::events::toggle_bookmark,
        crate::inbound::http::events::register_for_event,
        crate::inbound::http::events::my_registrations,
        crate::inbound::http::leaderboard::standings,
        crate::inbound::http::venues::list_venues,
        crate::inbound::http::venues::availability,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::DomainError,
        crate::domain::ErrorCode,
        crate::domain::User,
        crate::domain::UserPatch,
        crate::domain::Role,
        crate::domain::AuthSnapshot,
        crate::domain::Theme,
        crate::domain::SignupForm,
        crate::domain::SignupOutcome,
        crate::domain::Event,
        crate::domain::EventCategory,
        crate::domain::EventPatch,
        crate::domain::Venue,
        crate::domain::VenueKind,
        crate::domain::Booking,
        crate::domain::BookingStatus,
        crate::domain::LeaderboardEntry,
        crate::domain::RegistrationRow,
        crate::domain::NewRegistration,
        crate::inbound::http::auth::LoginRequest,
        crate::inbound::http::auth::ThemeResponse,
        crate::inbound::http::events::RegisterRequest,
        crate::inbound::http::venues::AvailabilityResponse,
    )),
    tags(
        (name = "auth", description = "Sessions, sign-up, and profile state"),
        (name = "events", description = "Event catalogue and registrations"),
        (name = "leaderboard", description = "Registration standings"),
        (name = "venues", description = "Venues and booking availability"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_builds_and_registers_core_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/signup",
            "/api/v1/login",
            "/api/v1/leaderboard",
            "/api/v1/venues/{id}/availability",
            "/health/ready",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn security_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
