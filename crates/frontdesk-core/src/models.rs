//! Domain records: seminars and their attendees.
//!
//! Wire names are camelCase to match the check-in client. Timestamps are
//! ISO-8601 strings; `breakfast_status` maps a `YYYY-MM-DD` date key to
//! whether breakfast was taken that day.

use crate::entity::Record;
use crate::error::Result;
use crate::EntityStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A seminar with a schedule and an assigned room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seminar {
    pub id: String,
    pub name: String,
    pub organizer: String,
    /// ISO 8601 timestamp
    pub start_date: String,
    /// ISO 8601 timestamp, not before `start_date`
    pub end_date: String,
    pub room: String,
}

/// Partial update for a [`Seminar`]; `None` fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeminarPatch {
    pub name: Option<String>,
    pub organizer: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub room: Option<String>,
}

impl Record for Seminar {
    type Patch = SeminarPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: SeminarPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(organizer) = patch.organizer {
            self.organizer = organizer;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(room) = patch.room {
            self.room = room;
        }
    }
}

/// An attendee registered to exactly one seminar.
///
/// `seminar_id` is a weak reference: referential integrity is enforced only
/// by the cascade delete in the route layer, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub seminar_id: String,
    pub full_name: String,
    pub room_number: String,
    /// `YYYY-MM-DD` date key → breakfast taken that day
    pub breakfast_status: BTreeMap<String, bool>,
}

/// Partial update for an [`Attendee`]. Only the fields the front desk can
/// edit; seminar membership and breakfast history are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeePatch {
    pub full_name: Option<String>,
    pub room_number: Option<String>,
}

impl Record for Attendee {
    type Patch = AttendeePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: AttendeePatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(room_number) = patch.room_number {
            self.room_number = room_number;
        }
    }
}

impl EntityStore<Attendee> {
    /// Marks breakfast as taken for `date` (`YYYY-MM-DD`) on the attendee.
    ///
    /// The only domain-specific write beyond generic CRUD. Leaves all other
    /// date entries untouched and is idempotent; fails with `NotFound` when
    /// the attendee does not exist.
    pub fn mark_breakfast_taken(&self, id: &str, date: &str) -> Result<Attendee> {
        let date = date.to_string();
        self.mutate(id, move |mut attendee| {
            attendee.breakfast_status.insert(date, true);
            attendee
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityConfig, ENTITY_PARTITION};
    use frontdesk_store::{MemoryBackend, Partition, StorageBackend};
    use std::sync::Arc;

    fn attendee(id: &str, seminar_id: &str, name: &str) -> Attendee {
        Attendee {
            id: id.to_string(),
            seminar_id: seminar_id.to_string(),
            full_name: name.to_string(),
            room_number: "101".to_string(),
            breakfast_status: BTreeMap::new(),
        }
    }

    fn attendee_store(seed: Vec<Attendee>) -> EntityStore<Attendee> {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .create_partition(&Partition::new(ENTITY_PARTITION))
            .unwrap();
        let store = EntityStore::new(
            backend,
            EntityConfig {
                entity_name: "attendee",
                index_name: "attendees",
                initial_state: Attendee::default(),
                seed_data: seed,
            },
        );
        store.ensure_seed().unwrap();
        store
    }

    #[test]
    fn mark_breakfast_sets_only_the_given_date() {
        let mut seeded = attendee("a1", "s1", "John Doe");
        seeded
            .breakfast_status
            .insert("2024-05-31".to_string(), false);
        let store = attendee_store(vec![seeded]);

        let updated = store.mark_breakfast_taken("a1", "2024-06-01").unwrap();
        assert_eq!(updated.breakfast_status.get("2024-06-01"), Some(&true));
        assert_eq!(updated.breakfast_status.get("2024-05-31"), Some(&false));
    }

    #[test]
    fn mark_breakfast_is_idempotent() {
        let store = attendee_store(vec![attendee("a1", "s1", "John Doe")]);

        let first = store.mark_breakfast_taken("a1", "2024-06-01").unwrap();
        let second = store.mark_breakfast_taken("a1", "2024-06-01").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.breakfast_status.len(), 1);
    }

    #[test]
    fn mark_breakfast_for_missing_attendee_fails() {
        let store = attendee_store(vec![]);
        let err = store.mark_breakfast_taken("ghost", "2024-06-01").unwrap_err();
        assert!(matches!(err, crate::EntityError::NotFound(_)));
    }

    #[test]
    fn attendee_patch_leaves_membership_and_history() {
        let mut seeded = attendee("a1", "s1", "John Doe");
        seeded.breakfast_status.insert("2024-06-01".to_string(), true);
        let store = attendee_store(vec![seeded]);

        let patched = store
            .patch(
                "a1",
                AttendeePatch {
                    full_name: Some("Jane Doe".to_string()),
                    room_number: None,
                },
            )
            .unwrap();

        assert_eq!(patched.full_name, "Jane Doe");
        assert_eq!(patched.room_number, "101");
        assert_eq!(patched.seminar_id, "s1");
        assert_eq!(patched.breakfast_status.get("2024-06-01"), Some(&true));
    }

    #[test]
    fn records_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(attendee("a1", "s1", "John Doe")).unwrap();
        assert!(json.get("seminarId").is_some());
        assert!(json.get("fullName").is_some());
        assert!(json.get("roomNumber").is_some());
        assert!(json.get("breakfastStatus").is_some());

        let json = serde_json::to_value(Seminar::default()).unwrap();
        assert!(json.get("startDate").is_some());
        assert!(json.get("endDate").is_some());
    }
}
