//! In-memory working set of events, venues, and filter selections.

use chrono::{NaiveDate, NaiveTime};

use super::error::DomainError;
use super::events::{Event, EventCategory, EventPatch};
use super::venues::Venue;

/// Mutable event catalogue with bookmark state and filter selections.
///
/// Mutation methods addressing an unknown event id are silent no-ops; the
/// store never reports which ids were touched. Registration does not check
/// capacity or deduplicate users; callers own that decision.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
    venues: Vec<Venue>,
    bookmarked: Vec<String>,
    search_term: String,
    selected_category: Option<EventCategory>,
    selected_department: Option<String>,
    selected_date: Option<NaiveDate>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full event list.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// Replace the full venue list.
    pub fn set_venues(&mut self, venues: Vec<Venue>) {
        self.venues = venues;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn bookmarked(&self) -> &[String] {
        &self.bookmarked
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn venue(&self, id: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Apply a patch to the matching event; unknown ids are ignored.
    pub fn update_event(&mut self, id: &str, patch: EventPatch) {
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            event.apply(patch);
        }
    }

    /// Remove the matching event; unknown ids are ignored.
    pub fn delete_event(&mut self, id: &str) {
        self.events.retain(|e| e.id != id);
    }

    /// Flip the bookmark for an event id. Flipping twice restores the
    /// original state; ids are never duplicated in the bookmark list.
    pub fn toggle_bookmark(&mut self, event_id: &str) {
        if let Some(pos) = self.bookmarked.iter().position(|id| id == event_id) {
            self.bookmarked.remove(pos);
        } else {
            self.bookmarked.push(event_id.to_owned());
        }
    }

    /// Record a user registration on the matching event.
    ///
    /// Appends the user and increments the registered count without a
    /// capacity or duplicate check. Unknown event ids are ignored.
    pub fn register_for_event(&mut self, event_id: &str, user_id: &str) {
        if let Some(event) = self.events.iter_mut().find(|e| e.id == event_id) {
            event.registered_users.push(user_id.to_owned());
            event.registered_count += 1;
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_selected_category(&mut self, category: Option<EventCategory>) {
        self.selected_category = category;
    }

    pub fn set_selected_department(&mut self, department: Option<String>) {
        self.selected_department = department;
    }

    pub fn set_selected_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    /// Events matching the current filter selections.
    ///
    /// The search term matches title, description, or any tag, case
    /// insensitively. Unset selections do not constrain the result; the
    /// stored event list is never mutated.
    pub fn filtered_events(&self) -> Vec<&Event> {
        let needle = self.search_term.trim().to_lowercase();
        self.events
            .iter()
            .filter(|event| {
                let matches_search = needle.is_empty()
                    || event.title.to_lowercase().contains(&needle)
                    || event.description.to_lowercase().contains(&needle)
                    || event.tags.iter().any(|t| t.to_lowercase().contains(&needle));
                let matches_category = self
                    .selected_category
                    .is_none_or(|c| event.category == c);
                let matches_department = self
                    .selected_department
                    .as_deref()
                    .is_none_or(|d| event.department == d);
                let matches_date = self.selected_date.is_none_or(|d| event.date == d);
                matches_search && matches_category && matches_department && matches_date
            })
            .collect()
    }

    /// Whether the venue is free for the half-open slot `[start, end)`.
    ///
    /// # Errors
    /// Returns [`DomainError::not_found`] when the venue id is unknown, so
    /// callers can distinguish "booked" from "no such venue".
    pub fn check_venue_availability(
        &self,
        venue_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool, DomainError> {
        let venue = self
            .venue(venue_id)
            .ok_or_else(|| DomainError::not_found(format!("unknown venue: {venue_id}")))?;
        Ok(venue.is_available(date, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::venues::{Booking, BookingStatus};
    use chrono::Utc;

    fn event(id: &str, title: &str, category: EventCategory, department: &str) -> Event {
        Event {
            id: id.into(),
            title: title.into(),
            description: "desc".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date"),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).expect("valid time"),
            venue_id: "v-1".into(),
            organizer_id: "org-1".into(),
            category,
            department: department.into(),
            tags: vec!["ai".into()],
            max_capacity: 100,
            registered_count: 0,
            is_approved: true,
            registered_users: Vec::new(),
            liked_by: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn store_with_events() -> EventStore {
        let mut store = EventStore::new();
        store.set_events(vec![
            event("e-1", "TechFest 2025", EventCategory::Technical, "CSE"),
            event("e-2", "Cultural Night", EventCategory::Cultural, "Design"),
        ]);
        store
    }

    #[test]
    fn update_and_delete_are_silent_for_unknown_ids() {
        let mut store = store_with_events();
        store.update_event(
            "missing",
            EventPatch {
                title: Some("x".into()),
                ..EventPatch::default()
            },
        );
        store.delete_event("missing");
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.events()[0].title, "TechFest 2025");
    }

    #[test]
    fn toggle_bookmark_twice_restores_state() {
        let mut store = store_with_events();
        store.toggle_bookmark("e-1");
        assert_eq!(store.bookmarked(), ["e-1".to_owned()]);
        store.toggle_bookmark("e-1");
        assert!(store.bookmarked().is_empty());
    }

    #[test]
    fn register_appends_without_capacity_or_duplicate_checks() {
        let mut store = store_with_events();
        store.register_for_event("e-1", "u-1");
        store.register_for_event("e-1", "u-1");
        let event = store.event("e-1").expect("event exists");
        assert_eq!(event.registered_count, 2);
        assert_eq!(event.registered_users, ["u-1".to_owned(), "u-1".to_owned()]);
    }

    #[test]
    fn filters_combine_and_leave_events_untouched() {
        let mut store = store_with_events();
        store.set_search_term("tech");
        store.set_selected_category(Some(EventCategory::Technical));
        let filtered = store.filtered_events();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "e-1");
        assert_eq!(store.events().len(), 2);
    }

    #[test]
    fn search_matches_tags_case_insensitively() {
        let mut store = store_with_events();
        store.set_search_term("AI");
        assert_eq!(store.filtered_events().len(), 2);
    }

    #[test]
    fn availability_reports_not_found_for_unknown_venue() {
        let store = store_with_events();
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date");
        let start = NaiveTime::from_hms_opt(10, 0, 0).expect("valid time");
        let end = NaiveTime::from_hms_opt(11, 0, 0).expect("valid time");
        let err = store
            .check_venue_availability("missing", date, start, end)
            .expect_err("unknown venue");
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
    }

    #[test]
    fn availability_respects_approved_bookings_only() {
        let mut store = store_with_events();
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date");
        let slot = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).expect("valid time");
        store.set_venues(vec![Venue {
            id: "v-1".into(),
            name: "Main Auditorium".into(),
            capacity: 500,
            kind: crate::domain::venues::VenueKind::Auditorium,
            facilities: vec![],
            building: "Academic Block 1".into(),
            floor: "Ground".into(),
            bookings: vec![Booking {
                id: "b-1".into(),
                event_id: "e-1".into(),
                venue_id: "v-1".into(),
                date,
                start_time: slot(10),
                end_time: slot(12),
                status: BookingStatus::Approved,
                requested_by: "u-1".into(),
                requested_at: Utc::now(),
            }],
        }]);
        assert_eq!(
            store.check_venue_availability("v-1", date, slot(11), slot(13)),
            Ok(false)
        );
        assert_eq!(
            store.check_venue_availability("v-1", date, slot(12), slot(13)),
            Ok(true)
        );
    }
}
