//! Seed data written on first boot, when an entity index has never been
//! initialized. Dates are relative to "today" so the demo roster always has
//! a seminar in progress.

use crate::models::{Attendee, Seminar};
use chrono::{Duration, Utc};
use std::collections::BTreeMap;

fn iso(offset_days: i64) -> String {
    (Utc::now() + Duration::days(offset_days)).to_rfc3339()
}

fn date_key(offset_days: i64) -> String {
    (Utc::now() + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn seed_seminars() -> Vec<Seminar> {
    vec![
        Seminar {
            id: "seminar-1".to_string(),
            name: "Cloud Connect 2024".to_string(),
            organizer: "Cloud Inc.".to_string(),
            start_date: iso(-1),
            end_date: iso(2),
            room: "Grand Ballroom".to_string(),
        },
        Seminar {
            id: "seminar-2".to_string(),
            name: "Future of AI Summit".to_string(),
            organizer: "Tech Innovators".to_string(),
            start_date: iso(0),
            end_date: iso(1),
            room: "Neptune".to_string(),
        },
        Seminar {
            id: "seminar-3".to_string(),
            name: "Digital Marketing World".to_string(),
            organizer: "Marketing Pro".to_string(),
            start_date: iso(5),
            end_date: iso(7),
            room: "Orion".to_string(),
        },
    ]
}

pub fn seed_attendees() -> Vec<Attendee> {
    let yesterday = date_key(-1);
    let today = date_key(0);

    let breakfast = |entries: &[(&str, bool)]| -> BTreeMap<String, bool> {
        entries
            .iter()
            .map(|(date, taken)| (date.to_string(), *taken))
            .collect()
    };

    vec![
        Attendee {
            id: "attendee-101".to_string(),
            seminar_id: "seminar-1".to_string(),
            full_name: "John Doe".to_string(),
            room_number: "101".to_string(),
            breakfast_status: breakfast(&[(&yesterday, true), (&today, true)]),
        },
        Attendee {
            id: "attendee-102".to_string(),
            seminar_id: "seminar-1".to_string(),
            full_name: "Jane Smith".to_string(),
            room_number: "102".to_string(),
            breakfast_status: breakfast(&[(&yesterday, true), (&today, false)]),
        },
        Attendee {
            id: "attendee-103".to_string(),
            seminar_id: "seminar-1".to_string(),
            full_name: "Peter Jones".to_string(),
            room_number: "103".to_string(),
            breakfast_status: breakfast(&[(&yesterday, true), (&today, true)]),
        },
        Attendee {
            id: "attendee-104".to_string(),
            seminar_id: "seminar-1".to_string(),
            full_name: "Mary Williams".to_string(),
            room_number: "104".to_string(),
            breakfast_status: breakfast(&[(&yesterday, true), (&today, false)]),
        },
        Attendee {
            id: "attendee-201".to_string(),
            seminar_id: "seminar-2".to_string(),
            full_name: "Koffi Jean".to_string(),
            room_number: "305".to_string(),
            breakfast_status: breakfast(&[(&today, true)]),
        },
        Attendee {
            id: "attendee-202".to_string(),
            seminar_id: "seminar-2".to_string(),
            full_name: "David Brown".to_string(),
            room_number: "306".to_string(),
            breakfast_status: breakfast(&[(&today, false)]),
        },
        Attendee {
            id: "attendee-203".to_string(),
            seminar_id: "seminar-2".to_string(),
            full_name: "Susan Garcia".to_string(),
            room_number: "307".to_string(),
            breakfast_status: breakfast(&[(&today, false)]),
        },
        Attendee {
            id: "attendee-204".to_string(),
            seminar_id: "seminar-2".to_string(),
            full_name: "Michael Miller".to_string(),
            room_number: "308".to_string(),
            breakfast_status: breakfast(&[(&today, true)]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let seminars = seed_seminars();
        let mut ids: Vec<&str> = seminars.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), seminars.len());

        let attendees = seed_attendees();
        let mut ids: Vec<&str> = attendees.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), attendees.len());
    }

    #[test]
    fn seed_attendees_reference_seeded_seminars() {
        let seminar_ids: Vec<String> = seed_seminars().into_iter().map(|s| s.id).collect();
        for attendee in seed_attendees() {
            assert!(seminar_ids.contains(&attendee.seminar_id));
        }
    }

    #[test]
    fn seminar_one_has_four_attendees() {
        let count = seed_attendees()
            .iter()
            .filter(|a| a.seminar_id == "seminar-1")
            .count();
        assert_eq!(count, 4);
    }
}
