//! Authentication and profile API handlers.
//!
//! ```text
//! POST /api/v1/signup
//! POST /api/v1/login {"email":"...","password":"..."}
//! POST /api/v1/logout
//! GET  /api/v1/me
//! PATCH /api/v1/me
//! POST /api/v1/theme
//! ```

use actix_web::{get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, SignupForm, SignupOutcome, Theme, UserPatch};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Login request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "test@jaipur.manipal.edu")]
    pub email: String,
    pub password: String,
}

/// Theme toggle response body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ThemeResponse {
    pub theme: Theme,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupForm,
    responses(
        (status = 201, description = "Account created", body = SignupOutcome),
        (status = 400, description = "Invalid form", body = DomainError),
        (status = 429, description = "Rate limited", body = DomainError),
        (status = 503, description = "Service not configured", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<SignupForm>,
) -> ApiResult<HttpResponse> {
    let outcome = state.accounts.sign_up(payload.into_inner()).await?;
    if let SignupOutcome::SignedIn { user } = &outcome {
        session.persist_user(&user.id)?;
        state.auth_mut().login(user.clone());
    }
    Ok(HttpResponse::Created().json(outcome))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = DomainError),
        (status = 503, description = "Service not configured", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let user = state.accounts.sign_in(&email, &password).await?;
    session.persist_user(&user.id)?;
    state.auth_mut().login(user.clone());
    Ok(HttpResponse::Ok().json(user))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext, state: web::Data<HttpState>) -> HttpResponse {
    session.clear();
    state.auth_mut().logout();
    HttpResponse::NoContent().finish()
}

/// Current auth state: user, authentication flag, and theme.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses((status = 200, description = "Current auth state", body = crate::domain::AuthSnapshot)),
    tags = ["auth"],
    operation_id = "me"
)]
#[get("/me")]
pub async fn me(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok().json(state.auth().snapshot())
}

/// Patch the signed-in user's profile.
#[utoipa::path(
    patch,
    path = "/api/v1/me",
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated user", body = crate::domain::User),
        (status = 401, description = "Not signed in", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "updateMe"
)]
#[patch("/me")]
pub async fn update_me(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<UserPatch>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let mut auth = state.auth_mut();
    auth.update_user(payload.into_inner());
    match auth.user() {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(DomainError::unauthorized("sign in required")),
    }
}

/// Flip the colour theme.
#[utoipa::path(
    post,
    path = "/api/v1/theme",
    responses((status = 200, description = "New theme", body = ThemeResponse)),
    tags = ["auth"],
    operation_id = "toggleTheme",
    security([])
)]
#[post("/theme")]
pub async fn toggle_theme(state: web::Data<HttpState>) -> HttpResponse {
    let mut auth = state.auth_mut();
    auth.toggle_theme();
    HttpResponse::Ok().json(ThemeResponse {
        theme: auth.theme(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    #[actix_web::test]
    async fn login_with_fixture_credentials_sets_state() {
        let (app, state) = test_app().await;
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({
                "email": crate::domain::ports::FIXTURE_EMAIL,
                "password": crate::domain::ports::FIXTURE_PASSWORD,
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(state.auth().is_authenticated());
    }

    #[actix_web::test]
    async fn login_with_bad_credentials_is_unauthorized() {
        let (app, state) = test_app().await;
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": "x@y.z", "password": "nope" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(!state.auth().is_authenticated());
    }

    #[actix_web::test]
    async fn signup_signs_the_user_in() {
        let (app, state) = test_app().await;
        let req = test::TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(json!({
                "name": "Rahul Sharma",
                "email": "rahul@jaipur.manipal.edu",
                "password": "secret123",
                "confirmPassword": "secret123",
                "role": "student",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "signedIn");
        assert!(state.auth().is_authenticated());
    }

    #[actix_web::test]
    async fn theme_toggle_round_trips() {
        let (app, _state) = test_app().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/v1/theme").to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["theme"], "dark");
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/v1/theme").to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["theme"], "light");
    }

    #[actix_web::test]
    async fn update_me_requires_a_session() {
        let (app, _state) = test_app().await;
        let req = test::TestRequest::patch()
            .uri("/api/v1/me")
            .set_json(json!({ "department": "CSE" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
