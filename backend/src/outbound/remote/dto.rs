//! Wire types for the hosted data service.
//!
//! The REST collections speak snake_case JSON; profile rows are mapped to
//! and from the domain [`User`] here so the adapter stays transport-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AuthenticatedIdentity;
use crate::domain::{Role, User};

/// Profile row in the `profiles` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRowDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default)]
    pub points: u32,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRowDto> for User {
    fn from(row: ProfileRowDto) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: Role::from_label(&row.role),
            department: row.department,
            year: row.year,
            points: row.points,
            created_at: row.created_at,
        }
    }
}

impl From<&User> for ProfileRowDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.label().to_owned(),
            department: user.department.clone(),
            year: user.year.clone(),
            points: user.points,
            created_at: user.created_at,
        }
    }
}

/// Metadata attached to a sign-up request.
#[derive(Debug, Serialize)]
pub struct SignupMetadataDto {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Body for the sign-up endpoint.
#[derive(Debug, Serialize)]
pub struct SignupRequestDto {
    pub email: String,
    pub password: String,
    pub data: SignupMetadataDto,
}

/// Body for the password-grant token endpoint.
#[derive(Debug, Serialize)]
pub struct PasswordGrantDto {
    pub email: String,
    pub password: String,
}

/// Profile metadata stored by the auth service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadataDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// Account object returned by the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserDto {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadataDto,
}

/// Response of the auth endpoints.
///
/// Sign-up with verification pending returns a bare user object; a usable
/// session additionally carries an access token and nests the user.
#[derive(Debug, Deserialize)]
pub struct AuthResponseDto {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUserDto>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadataDto>,
}

impl AuthResponseDto {
    /// Flatten either response shape into an identity.
    pub fn into_identity(self) -> Option<AuthenticatedIdentity> {
        let has_session = self.access_token.is_some();
        let (id, email, metadata) = match self.user {
            Some(user) => (user.id, user.email, user.user_metadata),
            None => (self.id?, self.email?, self.user_metadata.unwrap_or_default()),
        };
        Some(AuthenticatedIdentity {
            user_id: id,
            email,
            full_name: metadata.name,
            role: metadata.role,
            department: metadata.department,
            year: metadata.year,
            has_session,
        })
    }
}

/// Error body returned by the auth endpoints.
#[derive(Debug, Deserialize)]
pub struct AuthErrorDto {
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthErrorDto {
    pub fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or_else(|| "request rejected".to_owned())
    }
}
