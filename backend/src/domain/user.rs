//! User identity and profile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role granted to an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular student account; may hold a study year.
    #[default]
    Student,
    /// Event organiser account.
    Organizer,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Wire label, matching the serde representation.
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Organizer => "organizer",
            Self::Admin => "admin",
        }
    }

    /// Parse a wire label; unknown labels fall back to `Student`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "organizer" => Self::Organizer,
            "admin" => Self::Admin,
            _ => Self::Student,
        }
    }
}

/// Application user.
///
/// ## Invariants
/// - `points` is derived from registration activity and is never authoritative
///   on its own; the leaderboard recomputes it from registration rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier issued by the remote auth service.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Display name shown to other users.
    #[schema(example = "Priya Patel")]
    pub name: String,
    #[schema(example = "priya.patel@jaipur.manipal.edu")]
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Study year, present for students only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub points: u32,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to an existing [`User`].
///
/// Absent fields leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub points: Option<u32>,
}

impl User {
    /// Merge the provided fields into this user.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            name,
            email,
            role,
            department,
            year,
            points,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(role) = role {
            self.role = role;
        }
        if let Some(department) = department {
            self.department = Some(department);
        }
        if let Some(year) = year {
            self.year = Some(year);
        }
        if let Some(points) = points {
            self.points = points;
        }
    }
}
