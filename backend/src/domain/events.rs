//! Event catalogue entries.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Broad event category used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Technical,
    Cultural,
    Sports,
    Workshop,
    Seminar,
    Fest,
    Competition,
    Social,
}

/// A published or draft campus event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[schema(example = "TechFest 2025")]
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Venue identifier; resolved against the venue list.
    pub venue_id: String,
    /// Organiser user identifier.
    pub organizer_id: String,
    pub category: EventCategory,
    pub department: String,
    pub tags: Vec<String>,
    pub max_capacity: u32,
    pub registered_count: u32,
    pub is_approved: bool,
    /// User identifiers registered for the event.
    pub registered_users: Vec<String>,
    /// User identifiers who liked the event.
    #[serde(default)]
    pub liked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to an [`Event`]; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub venue_id: Option<String>,
    pub category: Option<EventCategory>,
    pub department: Option<String>,
    pub tags: Option<Vec<String>>,
    pub max_capacity: Option<u32>,
    pub is_approved: Option<bool>,
}

impl Event {
    /// Merge the provided fields into this event.
    pub fn apply(&mut self, patch: EventPatch) {
        let EventPatch {
            title,
            description,
            date,
            start_time,
            end_time,
            venue_id,
            category,
            department,
            tags,
            max_capacity,
            is_approved,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(start_time) = start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = end_time {
            self.end_time = end_time;
        }
        if let Some(venue_id) = venue_id {
            self.venue_id = venue_id;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(department) = department {
            self.department = department;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(max_capacity) = max_capacity {
            self.max_capacity = max_capacity;
        }
        if let Some(is_approved) = is_approved {
            self.is_approved = is_approved;
        }
    }
}
