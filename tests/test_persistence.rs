//! Seed-once and durability behavior across server restarts, exercised
//! against a real RocksDB instance.

use frontdesk_core::{AppContext, Seminar};
use frontdesk_store::RocksDbBackend;
use std::sync::Arc;
use tempfile::TempDir;

fn open_ctx(path: &std::path::Path) -> Arc<AppContext> {
    let backend = Arc::new(RocksDbBackend::open(path).unwrap());
    let ctx = AppContext::init(backend).unwrap();
    ctx.ensure_seed_all().unwrap();
    ctx
}

#[test]
fn reopen_does_not_reseed_and_keeps_writes() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = open_ctx(dir.path());
        assert_eq!(ctx.seminars().list().unwrap().len(), 3);

        ctx.seminars()
            .create(Seminar {
                id: "seminar-extra".to_string(),
                name: "Persistence Summit".to_string(),
                organizer: "Ops".to_string(),
                start_date: "2024-06-01T09:00:00Z".to_string(),
                end_date: "2024-06-01T17:00:00Z".to_string(),
                room: "Vault".to_string(),
            })
            .unwrap();
        assert!(ctx.seminars().delete("seminar-3").unwrap());
    }

    // Restart: ensure_seed_all must be a no-op, deletes must stick
    let ctx = open_ctx(dir.path());
    let seminars = ctx.seminars().list().unwrap();
    let ids: Vec<&str> = seminars.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["seminar-1", "seminar-2", "seminar-extra"]);
    assert_eq!(ctx.attendees().list().unwrap().len(), 8);
}

#[test]
fn breakfast_flags_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let ctx = open_ctx(dir.path());
        ctx.attendees()
            .mark_breakfast_taken("attendee-202", "2024-06-01")
            .unwrap();
    }

    let ctx = open_ctx(dir.path());
    let attendee = ctx.attendees().get_state("attendee-202").unwrap();
    assert_eq!(attendee.breakfast_status.get("2024-06-01"), Some(&true));
}
