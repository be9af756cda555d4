// Hotel directory: the collaborator that owns hotel records and their catalog overrides

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{info, warn};

use crate::catalog::{Catalog, Hotel, HotelId};
use crate::error::StoreError;
use crate::validation::validate_catalog_edit;

#[async_trait]
pub trait HotelDirectory: Send + Sync + 'static {
    async fn find_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>, StoreError>;

    // Sorted by hotel id
    async fn list_hotels(&self) -> Result<Vec<Hotel>, StoreError>;

    async fn register_hotel(&self, hotel: Hotel) -> Result<Hotel, StoreError>;

    /// Replace (or, with `None`, remove) a hotel's catalog override.
    ///
    /// Succeeds only if the hotel is still at `expected_revision`. A present
    /// override is validated before anything is written.
    async fn replace_catalog_override(
        &self,
        hotel_id: &str,
        expected_revision: u64,
        catalog: Option<Catalog>,
    ) -> Result<Hotel, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryHotelDirectory {
    hotels: DashMap<HotelId, Hotel>,
}

impl InMemoryHotelDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hotels(hotels: impl IntoIterator<Item = Hotel>) -> Self {
        let directory = Self::new();
        for hotel in hotels {
            directory.hotels.insert(hotel.id.clone(), hotel);
        }
        directory
    }
}

#[async_trait]
impl HotelDirectory for InMemoryHotelDirectory {
    async fn find_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>, StoreError> {
        Ok(self.hotels.get(hotel_id).map(|entry| entry.value().clone()))
    }

    async fn list_hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        let mut hotels: Vec<Hotel> = self.hotels.iter().map(|entry| entry.value().clone()).collect();
        hotels.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(hotels)
    }

    async fn register_hotel(&self, hotel: Hotel) -> Result<Hotel, StoreError> {
        if let Some(catalog) = hotel.catalog_override.clone() {
            validate_catalog_edit(catalog)?;
        }

        match self.hotels.entry(hotel.id.clone()) {
            Entry::Occupied(_) => {
                warn!(hotel_id = %hotel.id, "Rejected registration of existing hotel");
                Err(StoreError::DuplicateHotel(hotel.id))
            }
            Entry::Vacant(slot) => {
                info!(hotel_id = %hotel.id, name = %hotel.name, "Registered hotel");
                slot.insert(hotel.clone());
                Ok(hotel)
            }
        }
    }

    async fn replace_catalog_override(
        &self,
        hotel_id: &str,
        expected_revision: u64,
        catalog: Option<Catalog>,
    ) -> Result<Hotel, StoreError> {
        let catalog = catalog.map(validate_catalog_edit).transpose()?;

        let mut entry = self
            .hotels
            .get_mut(hotel_id)
            .ok_or_else(|| StoreError::HotelNotFound(hotel_id.to_string()))?;

        if entry.revision != expected_revision {
            warn!(
                hotel_id,
                expected = expected_revision,
                actual = entry.revision,
                "Rejected stale hotel catalog edit"
            );
            return Err(StoreError::VersionConflict {
                expected: expected_revision,
                actual: entry.revision,
            });
        }

        entry.catalog_override = catalog;
        entry.revision += 1;
        info!(
            hotel_id,
            revision = entry.revision,
            overridden = entry.catalog_override.is_some(),
            "Replaced hotel catalog"
        );

        Ok(entry.value().clone())
    }
}
