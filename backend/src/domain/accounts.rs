//! Account workflows: sign-up and sign-in over the auth gateway.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;
use utoipa::ToSchema;

use super::defaults;
use super::error::DomainError;
use super::ports::{
    AuthGateway, AuthGatewayError, AuthenticatedIdentity, SignupProfile, UserDirectory,
};
use super::user::{Role, User};

/// How long sign-ups stay locally suppressed after the remote service
/// reports rate limiting.
pub const SIGNUP_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Whether the remote service is configured, and which values are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAvailability {
    missing: Vec<&'static str>,
}

impl ServiceAvailability {
    pub fn configured() -> Self {
        Self::default()
    }

    pub fn missing(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }

    pub fn is_configured(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fail with a configuration error naming the missing values.
    ///
    /// # Errors
    /// Returns [`DomainError::not_configured`] when any value is missing.
    pub fn require(&self) -> Result<(), DomainError> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(
            DomainError::not_configured("authentication service is not configured")
                .with_details(json!({ "missing": self.missing })),
        )
    }
}

/// Form submitted to create an account.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    #[schema(example = "rahul.sharma@jaipur.manipal.edu")]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// Result of a successful sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SignupOutcome {
    /// The account is immediately usable.
    SignedIn { user: User },
    /// The service created the account but requires email verification
    /// before the first sign-in.
    VerificationRequired,
}

/// Sign-up and sign-in workflows over the auth gateway and user directory.
pub struct AccountService {
    gateway: Arc<dyn AuthGateway>,
    directory: Arc<dyn UserDirectory>,
    availability: ServiceAvailability,
    rate_limit_until: Mutex<Option<Instant>>,
}

impl AccountService {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        directory: Arc<dyn UserDirectory>,
        availability: ServiceAvailability,
    ) -> Self {
        Self {
            gateway,
            directory,
            availability,
            rate_limit_until: Mutex::new(None),
        }
    }

    /// Create an account.
    ///
    /// Validation happens before the gateway is contacted. When the gateway
    /// reports rate limiting, further sign-ups are suppressed locally for
    /// [`SIGNUP_RATE_LIMIT_WINDOW`] without hitting the service again.
    ///
    /// # Errors
    /// Configuration, validation, rate-limit, and gateway failures.
    pub async fn sign_up(&self, form: SignupForm) -> Result<SignupOutcome, DomainError> {
        self.check_rate_limit_window()?;
        self.availability.require()?;
        validate_signup(&form)?;

        let profile = SignupProfile {
            name: form.name.trim().to_owned(),
            role: form.role.label().to_owned(),
            department: form.department.clone(),
            year: form.year.clone(),
        };
        let identity = match self
            .gateway
            .sign_up(form.email.trim(), &form.password, profile)
            .await
        {
            Ok(identity) => identity,
            Err(AuthGatewayError::RateLimited {}) => {
                self.open_rate_limit_window();
                return Err(rate_limited_error());
            }
            Err(error) => return Err(gateway_error(&error)),
        };

        let user = self.build_user(&identity, form.role);
        // Profile storage is best effort; the account already exists.
        if let Err(error) = self.directory.upsert(&user).await {
            warn!(%error, user_id = %user.id, "failed to store profile after sign-up");
        }

        if identity.has_session {
            Ok(SignupOutcome::SignedIn { user })
        } else {
            Ok(SignupOutcome::VerificationRequired)
        }
    }

    /// Verify credentials and resolve the stored profile.
    ///
    /// When the directory has no profile (or cannot be reached) a fallback
    /// profile is built from the auth metadata and stored best effort.
    ///
    /// # Errors
    /// Configuration and gateway failures; rejected credentials map to
    /// `unauthorized`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, DomainError> {
        self.availability.require()?;
        let identity = self
            .gateway
            .sign_in(email.trim(), password)
            .await
            .map_err(|error| match error {
                AuthGatewayError::Rejected { message } => DomainError::unauthorized(message),
                AuthGatewayError::RateLimited {} => rate_limited_error(),
                other => gateway_error(&other),
            })?;

        let stored = match self.directory.find_by_id(&identity.user_id).await {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, user_id = %identity.user_id, "profile lookup failed; using auth metadata");
                None
            }
        };
        if let Some(user) = stored {
            return Ok(user);
        }

        let role = identity
            .role
            .as_deref()
            .map(Role::from_label)
            .unwrap_or_default();
        let user = self.build_user(&identity, role);
        if let Err(error) = self.directory.upsert(&user).await {
            warn!(%error, user_id = %user.id, "failed to store fallback profile");
        }
        Ok(user)
    }

    fn build_user(&self, identity: &AuthenticatedIdentity, role: Role) -> User {
        User {
            id: identity.user_id.clone(),
            name: defaults::profile_name(identity.full_name.as_deref(), &identity.email),
            email: identity.email.clone(),
            role,
            department: identity.department.clone(),
            year: identity.year.clone(),
            points: 0,
            created_at: Utc::now(),
        }
    }

    fn check_rate_limit_window(&self) -> Result<(), DomainError> {
        let mut until = self
            .rate_limit_until
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match *until {
            Some(deadline) if Instant::now() < deadline => Err(rate_limited_error()),
            Some(_) => {
                *until = None;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn open_rate_limit_window(&self) {
        let mut until = self
            .rate_limit_until
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *until = Some(Instant::now() + SIGNUP_RATE_LIMIT_WINDOW);
    }
}

fn validate_signup(form: &SignupForm) -> Result<(), DomainError> {
    if form.password != form.confirm_password {
        return Err(DomainError::invalid_request("passwords do not match")
            .with_details(json!({ "field": "confirmPassword" })));
    }
    if form.password.len() < 8 {
        return Err(
            DomainError::invalid_request("password must be at least 8 characters")
                .with_details(json!({ "field": "password" })),
        );
    }
    let email = form.email.trim();
    let malformed = match email.split_once('@') {
        Some((local, domain)) => local.is_empty() || domain.is_empty() || !domain.contains('.'),
        None => true,
    };
    if malformed {
        return Err(DomainError::invalid_request("email address is malformed")
            .with_details(json!({ "field": "email" })));
    }
    Ok(())
}

fn rate_limited_error() -> DomainError {
    DomainError::rate_limited("too many sign-up attempts; try again shortly")
}

fn gateway_error(error: &AuthGatewayError) -> DomainError {
    DomainError::internal(error.to_string())
}
