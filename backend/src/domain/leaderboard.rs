//! Pure leaderboard aggregation over registration rows.
//!
//! Grouping is keyed on the trimmed, lowercased email. Rows without a usable
//! email never merge with anything; each gets a synthetic key derived from
//! its row id. Points are a flat rate per registration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use super::defaults;
use super::registration::RegistrationRow;

/// Flat points awarded per registration row.
pub const POINTS_PER_REGISTRATION: u32 = 10;

/// One participant's standing on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Group key: normalised email, or a synthetic row key.
    pub key: String,
    pub name: String,
    pub department: String,
    pub points: u32,
    /// Number of registration rows in the group.
    pub registrations: u32,
}

/// Grouping key for a row: normalised email, else a synthetic per-row key.
fn group_key(row: &RegistrationRow) -> String {
    match defaults::non_empty(row.email.as_deref()) {
        Some(email) => email.to_lowercase(),
        None => format!("row:{}", row.id),
    }
}

struct Group {
    key: String,
    name: Option<String>,
    email: Option<String>,
    department: Option<String>,
    count: u32,
}

/// Aggregate registration rows into sorted standings.
///
/// Entries are ordered by points descending; ties break by ascending group
/// key so the output does not depend on input order.
pub fn aggregate(rows: &[RegistrationRow]) -> Vec<LeaderboardEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for row in rows {
        let key = group_key(row);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(Group {
                key,
                name: None,
                email: None,
                department: None,
                count: 0,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.count += 1;
        if group.name.is_none() {
            group.name = defaults::non_empty(row.full_name.as_deref()).map(str::to_owned);
        }
        if group.email.is_none() {
            group.email = defaults::non_empty(row.email.as_deref()).map(str::to_owned);
        }
        if group.department.is_none() {
            group.department = defaults::non_empty(row.department.as_deref()).map(str::to_owned);
        }
    }

    let mut entries: Vec<LeaderboardEntry> = groups
        .into_iter()
        .map(|group| LeaderboardEntry {
            name: defaults::display_name(group.name.as_deref(), group.email.as_deref()),
            department: defaults::department(group.department.as_deref()),
            points: group.count * POINTS_PER_REGISTRATION,
            registrations: group.count,
            key: group.key,
        })
        .collect();
    entries.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.key.cmp(&b.key)));
    entries
}

#[cfg(test)]
mod tests;
