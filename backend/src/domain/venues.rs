//! Venues and booking availability.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Physical venue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum VenueKind {
    Auditorium,
    SeminarHall,
    Lawn,
    Classroom,
    SportsComplex,
}

/// Review state of a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

/// A booking request against a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub venue_id: String,
    pub date: NaiveDate,
    /// Inclusive start of the booked slot.
    pub start_time: NaiveTime,
    /// Exclusive end of the booked slot.
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub requested_by: String,
    pub requested_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking blocks the candidate half-open slot
    /// `[start, end)` on `date`.
    ///
    /// Only approved bookings block. Slots that merely touch at an endpoint
    /// do not overlap: a booking ending at 12:00 leaves 12:00 onwards free.
    pub fn blocks(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.status == BookingStatus::Approved
            && self.date == date
            && self.start_time < end
            && start < self.end_time
    }
}

/// A bookable venue on campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    #[schema(example = "Main Auditorium")]
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: VenueKind,
    pub facilities: Vec<String>,
    pub building: String,
    pub floor: String,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Venue {
    /// Whether the venue is free for the half-open slot `[start, end)`.
    pub fn is_available(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        !self.bookings.iter().any(|b| b.blocks(date, start, end))
    }
}
