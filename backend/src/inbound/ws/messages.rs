//! Frames pushed to WebSocket subscribers.

use serde::Serialize;

use crate::domain::LeaderboardEntry;

/// Server-to-client frame, tagged by `type`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Full replacement standings, points descending.
    Standings { entries: Vec<LeaderboardEntry> },
}
