use std::sync::Arc;
use serenity_booking::SubmissionGate;
use serenity_catalog::{CapacityRules, GuestParty, RoomCatalog};
use serenity_core::{BookingBackend, CoreResult, SessionStore};
use serenity_store::CatalogSource;

use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BookingBackend>,
    pub session: Arc<SessionStore>,
    pub submission: SubmissionGate,
    pub capacity: CapacityRules,
    pub catalog_source: CatalogSource,
    pub max_party_members: u32,
}

impl AppState {
    pub fn new(backend: Arc<dyn BookingBackend>, session: Arc<SessionStore>) -> Self {
        Self {
            backend,
            session,
            submission: SubmissionGate::new(),
            capacity: CapacityRules::default(),
            catalog_source: CatalogSource::Backend,
            max_party_members: 10,
        }
    }

    /// Room catalog from the configured source
    pub async fn catalog(&self) -> CoreResult<RoomCatalog> {
        match self.catalog_source {
            CatalogSource::Static => Ok(RoomCatalog::serenity_default()),
            CatalogSource::Backend => Ok(RoomCatalog::new(self.backend.room_types().await?)),
        }
    }

    /// Rejects request parties with a counter above `max_party_members`
    pub fn bounded_party(&self, party: GuestParty) -> Result<GuestParty, AppError> {
        if party.exceeds(self.max_party_members) {
            return Err(AppError::ValidationError(format!(
                "Adults, children and rooms are limited to {} each",
                self.max_party_members
            )));
        }
        Ok(party)
    }
}
