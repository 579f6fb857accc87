//! Cookie session boundary.

use actix_session::Session;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::DomainError;

const USER_ID_KEY: &str = "user_id";

/// Thin wrapper around the cookie session so handlers never touch raw keys.
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Store the signed-in user id in the session cookie.
    ///
    /// # Errors
    /// Internal error when the session payload cannot be serialised.
    pub fn persist_user(&self, user_id: &str) -> Result<(), DomainError> {
        self.session
            .insert(USER_ID_KEY, user_id)
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in user id, if the cookie holds a readable one.
    pub fn user_id(&self) -> Option<String> {
        match self.session.get::<String>(USER_ID_KEY) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "unreadable session payload; treating as signed out");
                None
            }
        }
    }

    /// The signed-in user id, or an `unauthorized` error.
    ///
    /// # Errors
    /// Unauthorized when no user is signed in.
    pub fn require_user_id(&self) -> Result<String, DomainError> {
        self.user_id()
            .ok_or_else(|| DomainError::unauthorized("sign in required"))
    }

    /// Drop all session state.
    pub fn clear(&self) {
        self.session.purge();
    }
}

impl From<Session> for SessionContext {
    fn from(session: Session) -> Self {
        Self::new(session)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
