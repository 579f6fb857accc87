//! Demonstration catalogue seeded when no remote service is configured.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use super::events::{Event, EventCategory};
use super::venues::{Venue, VenueKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

/// Seed venues and events for the development catalogue.
pub fn demo_catalogue() -> (Vec<Event>, Vec<Venue>) {
    let created_at = Utc
        .with_ymd_and_hms(2025, 1, 10, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    let venues = vec![
        Venue {
            id: "venue-1".into(),
            name: "Main Auditorium".into(),
            capacity: 500,
            kind: VenueKind::Auditorium,
            facilities: vec![
                "Projector".into(),
                "Sound System".into(),
                "Air Conditioning".into(),
            ],
            building: "Academic Block A".into(),
            floor: "Ground Floor".into(),
            bookings: Vec::new(),
        },
        Venue {
            id: "venue-2".into(),
            name: "Seminar Hall 1".into(),
            capacity: 100,
            kind: VenueKind::SeminarHall,
            facilities: vec!["Projector".into(), "Whiteboard".into()],
            building: "Academic Block B".into(),
            floor: "1st Floor".into(),
            bookings: Vec::new(),
        },
        Venue {
            id: "venue-3".into(),
            name: "Central Lawn".into(),
            capacity: 1000,
            kind: VenueKind::Lawn,
            facilities: vec!["Open Air".into(), "Stage Setup".into()],
            building: "Central Campus".into(),
            floor: "Ground Level".into(),
            bookings: Vec::new(),
        },
    ];

    let events = vec![
        Event {
            id: "event-1".into(),
            title: "TechFest 2025: AI & Machine Learning Workshop".into(),
            description: "Hands-on workshop covering practical machine learning with \
                          industry mentors."
                .into(),
            date: date(2025, 3, 15),
            start_time: time(10, 0),
            end_time: time(16, 0),
            venue_id: "venue-1".into(),
            organizer_id: "user-2".into(),
            category: EventCategory::Technical,
            department: "Computer Science".into(),
            tags: vec!["AI".into(), "ML".into(), "Workshop".into()],
            max_capacity: 200,
            registered_count: 0,
            is_approved: true,
            registered_users: Vec::new(),
            liked_by: Vec::new(),
            created_at,
        },
        Event {
            id: "event-2".into(),
            title: "Cultural Night: Bollywood Dance Competition".into(),
            description: "Inter-department dance competition with live judging.".into(),
            date: date(2025, 3, 22),
            start_time: time(18, 0),
            end_time: time(22, 0),
            venue_id: "venue-3".into(),
            organizer_id: "user-2".into(),
            category: EventCategory::Cultural,
            department: "Student Affairs".into(),
            tags: vec!["Dance".into(), "Competition".into(), "Bollywood".into()],
            max_capacity: 500,
            registered_count: 0,
            is_approved: true,
            registered_users: Vec::new(),
            liked_by: Vec::new(),
            created_at,
        },
    ];

    (events, venues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_references_a_known_venue() {
        let (events, venues) = demo_catalogue();
        for event in &events {
            assert!(
                venues.iter().any(|v| v.id == event.venue_id),
                "event {} references unknown venue {}",
                event.id,
                event.venue_id
            );
        }
    }
}
