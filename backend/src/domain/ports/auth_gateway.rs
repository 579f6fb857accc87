//! Driven port for the hosted authentication service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::macros::define_port_error;

define_port_error! {
    /// Failures reported by an authentication gateway.
    AuthGatewayError {
        /// The service refused further sign-up attempts for now.
        RateLimited {} => "authentication service is rate limiting requests",
        /// Credentials or sign-up data were rejected.
        Rejected { message: String } => "authentication rejected: {message}",
        /// The backing service could not be reached.
        Unreachable { message: String } => "authentication service unreachable: {message}",
    }
}

/// Profile metadata attached to a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupProfile {
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub year: Option<String>,
}

/// Identity returned by the auth service after sign-up or sign-in.
///
/// `has_session` distinguishes an immediately usable account from one that
/// still awaits email verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub has_session: bool,
}

/// Credential verification and account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account with the given credentials and profile metadata.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: SignupProfile,
    ) -> Result<AuthenticatedIdentity, AuthGatewayError>;

    /// Verify credentials and return the stored identity.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedIdentity, AuthGatewayError>;
}

/// Permissive gateway used in development and tests.
///
/// Accepts any sign-up; sign-in accepts only the fixture credentials.
#[derive(Debug, Default)]
pub struct FixtureAuthGateway;

/// Email accepted by [`FixtureAuthGateway::sign_in`].
pub const FIXTURE_EMAIL: &str = "test@jaipur.manipal.edu";
/// Password accepted by [`FixtureAuthGateway::sign_in`].
pub const FIXTURE_PASSWORD: &str = "test1234";

impl FixtureAuthGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        profile: SignupProfile,
    ) -> Result<AuthenticatedIdentity, AuthGatewayError> {
        Ok(AuthenticatedIdentity {
            user_id: uuid::Uuid::new_v4().to_string(),
            email: email.to_owned(),
            full_name: Some(profile.name),
            role: Some(profile.role),
            department: profile.department,
            year: profile.year,
            has_session: true,
        })
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedIdentity, AuthGatewayError> {
        if email == FIXTURE_EMAIL && password == FIXTURE_PASSWORD {
            Ok(AuthenticatedIdentity {
                user_id: "fixture-user".into(),
                email: email.to_owned(),
                full_name: Some("Test Student".into()),
                role: Some("student".into()),
                department: Some("Computer Science".into()),
                year: Some("3rd Year".into()),
                has_session: true,
            })
        } else {
            Err(AuthGatewayError::rejected("invalid login credentials"))
        }
    }
}
