//! Application context: the entity stores shared across request handlers.

use crate::entity::{EntityConfig, EntityStore, ENTITY_PARTITION};
use crate::error::Result;
use crate::models::{Attendee, Seminar};
use crate::seed;
use frontdesk_store::{Partition, StorageBackend};
use std::sync::Arc;

/// Aggregates the per-entity stores over one storage backend.
///
/// Request handlers receive this behind `web::Data<Arc<AppContext>>`; no
/// other mutable state is shared between requests.
pub struct AppContext {
    seminars: EntityStore<Seminar>,
    attendees: EntityStore<Attendee>,
}

impl AppContext {
    /// Builds the stores and makes sure the shared partition exists.
    pub fn init(backend: Arc<dyn StorageBackend>) -> Result<Arc<Self>> {
        backend.create_partition(&Partition::new(ENTITY_PARTITION))?;

        let seminars = EntityStore::new(
            backend.clone(),
            EntityConfig {
                entity_name: "seminar",
                index_name: "seminars",
                initial_state: Seminar::default(),
                seed_data: seed::seed_seminars(),
            },
        );
        let attendees = EntityStore::new(
            backend,
            EntityConfig {
                entity_name: "attendee",
                index_name: "attendees",
                initial_state: Attendee::default(),
                seed_data: seed::seed_attendees(),
            },
        );

        Ok(Arc::new(Self {
            seminars,
            attendees,
        }))
    }

    pub fn seminars(&self) -> &EntityStore<Seminar> {
        &self.seminars
    }

    pub fn attendees(&self) -> &EntityStore<Attendee> {
        &self.attendees
    }

    /// Seeds every entity type whose index has never been initialized.
    /// Idempotent; called on startup.
    pub fn ensure_seed_all(&self) -> Result<()> {
        self.seminars.ensure_seed()?;
        self.attendees.ensure_seed()?;
        Ok(())
    }
}
