// Booking desk: the single entry point used for price quotes, booking creation,
// hotel listings and catalog administration

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::availability::{available_room_types, default_room_type, is_hotel_bookable};
use crate::catalog::{Catalog, Hotel, HotelId};
use crate::directory::HotelDirectory;
use crate::error::{PricingError, StoreError};
use crate::pricing::{BookingRequest, PriceBreakdown, PricingEngine};
use crate::resolution::{resolve_active_catalog, ActiveCatalog};
use crate::settings_store::SettingsStore;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Hotel not found: {0}")]
    HotelNotFound(String),

    #[error("Invalid hotel: {0}")]
    InvalidHotel(String),

    #[error("Unknown room type: {0}")]
    UnknownRoomType(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogSource {
    Global,
    Hotel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub currency: String,
    pub catalog_source: CatalogSource,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingStatus {
    Confirmed,
}

/// Immutable record of a confirmed stay. `price` is the engine's total at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub guest_id: String,
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub room_type: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub price: f64,
    pub currency: String,
    pub payment_method: String,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

// Card shown in the hotel list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelListing {
    pub hotel_id: HotelId,
    pub name: String,
    pub city: String,
    pub starts_from: f64,
    pub bookable: bool,
}

// Entry of the room-type selector on a hotel's detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOption {
    pub name: String,
    pub nightly_rate: f64,
    pub max_guests: u32,
}

#[derive(Debug, Default)]
pub struct DeskStats {
    pub quotes_served: AtomicUsize,
    pub bookings_created: AtomicUsize,
    pub requests_rejected: AtomicUsize,
    pub configuration_errors: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeskStatsReport {
    pub quotes_served: usize,
    pub bookings_created: usize,
    pub requests_rejected: usize,
    pub configuration_errors: usize,
}

pub struct BookingDesk {
    engine: PricingEngine,
    settings: Arc<SettingsStore>,
    directory: Arc<dyn HotelDirectory>,
    stats: DeskStats,
}

impl BookingDesk {
    pub fn new(
        engine: PricingEngine,
        settings: Arc<SettingsStore>,
        directory: Arc<dyn HotelDirectory>,
    ) -> Self {
        Self {
            engine,
            settings,
            directory,
            stats: DeskStats::default(),
        }
    }

    /// Price a stay without booking it. Safe to call repeatedly.
    pub async fn quote(&self, request: &BookingRequest) -> Result<Quote, DeskError> {
        let quote = self.price_request(request).await?;
        self.stats.quotes_served.fetch_add(1, Ordering::SeqCst);
        Ok(quote)
    }

    /// Create a booking whose price is computed exactly as [`BookingDesk::quote`] does.
    pub async fn book(
        &self,
        guest_id: &str,
        request: &BookingRequest,
        payment_method: &str,
    ) -> Result<Booking, DeskError> {
        let quote = self.price_request(request).await?;

        let booking = Booking {
            id: format!("booking_{}", rand::random::<u32>()),
            guest_id: guest_id.to_string(),
            hotel_id: quote.hotel_id,
            hotel_name: quote.hotel_name,
            room_type: quote.breakdown.room_type_used,
            check_in: request.check_in.clone().unwrap_or_default(),
            check_out: request.check_out.clone().unwrap_or_default(),
            guests: u32::try_from(request.guests).unwrap_or(u32::MAX),
            price: quote.breakdown.total,
            currency: quote.currency,
            payment_method: payment_method.to_string(),
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
        };

        self.stats.bookings_created.fetch_add(1, Ordering::SeqCst);
        info!(
            booking_id = %booking.id,
            hotel_id = %booking.hotel_id,
            price = booking.price,
            "Booking confirmed"
        );

        Ok(booking)
    }

    pub async fn listings(&self) -> Result<Vec<HotelListing>, DeskError> {
        let global = self.settings.global();
        let hotels = self.directory.list_hotels().await?;

        let listings = hotels
            .into_iter()
            .map(|hotel| {
                let bookable = match resolve_active_catalog(&hotel, Some(global.value.as_ref())) {
                    Ok(active) => is_hotel_bookable(active.catalog()),
                    Err(e) => {
                        self.report_configuration_error(&hotel.id, &e);
                        false
                    }
                };

                HotelListing {
                    hotel_id: hotel.id,
                    name: hotel.name,
                    city: hotel.city,
                    starts_from: hotel.base_price,
                    bookable,
                }
            })
            .collect();

        Ok(listings)
    }

    // Empty when the hotel is fully booked
    pub async fn room_options(&self, hotel_id: &str) -> Result<Vec<RoomOption>, DeskError> {
        let hotel = self.find_hotel(hotel_id).await?;
        let global = self.settings.global();
        let active = self.resolve(&hotel, &global.value)?;

        Ok(available_room_types(active.catalog())
            .into_iter()
            .map(|rt| RoomOption {
                name: rt.name.clone(),
                nightly_rate: rt.nightly_rate(hotel.base_price),
                max_guests: rt.max_guests,
            })
            .collect())
    }

    pub async fn register_hotel(&self, mut hotel: Hotel) -> Result<Hotel, DeskError> {
        if !hotel.base_price.is_finite() || hotel.base_price <= 0.0 {
            return Err(DeskError::InvalidHotel(format!(
                "base price {} must be a positive amount",
                hotel.base_price
            )));
        }

        if hotel.catalog_override.is_none() && self.settings.config().snapshot_global_on_create {
            hotel.catalog_override = Some(self.settings.global().value.as_ref().clone());
        }

        Ok(self.directory.register_hotel(hotel).await?)
    }

    pub fn replace_global_catalog(&self, expected_version: u64, candidate: Catalog) -> Result<u64, DeskError> {
        Ok(self.settings.replace_global(expected_version, candidate)?)
    }

    pub async fn replace_hotel_catalog(
        &self,
        hotel_id: &str,
        expected_revision: u64,
        candidate: Catalog,
    ) -> Result<Hotel, DeskError> {
        Ok(self
            .directory
            .replace_catalog_override(hotel_id, expected_revision, Some(candidate))
            .await?)
    }

    // Hotel goes back to inheriting the global catalog
    pub async fn clear_hotel_catalog(&self, hotel_id: &str, expected_revision: u64) -> Result<Hotel, DeskError> {
        Ok(self
            .directory
            .replace_catalog_override(hotel_id, expected_revision, None)
            .await?)
    }

    /// Enable or disable one room type for a hotel.
    ///
    /// A hotel inheriting the global catalog gets its own copy first, so the
    /// change never leaks to other hotels. The whole catalog is rewritten.
    pub async fn set_room_type_available(
        &self,
        hotel_id: &str,
        room_type: &str,
        available: bool,
    ) -> Result<Hotel, DeskError> {
        let hotel = self.find_hotel(hotel_id).await?;
        let global = self.settings.global();
        let mut catalog = self.resolve(&hotel, &global.value)?.catalog().clone();

        let entry = catalog
            .room_types
            .iter_mut()
            .find(|rt| rt.name == room_type)
            .ok_or_else(|| DeskError::UnknownRoomType(room_type.to_string()))?;
        entry.available = available;

        self.replace_hotel_catalog(hotel_id, hotel.revision, catalog).await
    }

    pub fn stats(&self) -> DeskStatsReport {
        DeskStatsReport {
            quotes_served: self.stats.quotes_served.load(Ordering::SeqCst),
            bookings_created: self.stats.bookings_created.load(Ordering::SeqCst),
            requests_rejected: self.stats.requests_rejected.load(Ordering::SeqCst),
            configuration_errors: self.stats.configuration_errors.load(Ordering::SeqCst),
        }
    }

    async fn price_request(&self, request: &BookingRequest) -> Result<Quote, DeskError> {
        let hotel = self.find_hotel(&request.hotel_id).await?;
        let global = self.settings.global();
        let active = self.resolve(&hotel, &global.value)?;
        let catalog = active.catalog();

        let catalog_source = if active.is_overridden() {
            CatalogSource::Hotel
        } else {
            CatalogSource::Global
        };

        let mut request = request.clone();
        if request.room_type_name.trim().is_empty() {
            if let Some(room_type) = default_room_type(catalog) {
                request.room_type_name = room_type.name.clone();
            }
        }

        let breakdown = self
            .engine
            .compute_price(hotel.base_price, catalog, &request)
            .map_err(|e| self.record_failure(&hotel.id, e))?;

        Ok(Quote {
            hotel_id: hotel.id,
            hotel_name: hotel.name,
            currency: self.engine.config().currency.clone(),
            catalog_source,
            breakdown,
        })
    }

    async fn find_hotel(&self, hotel_id: &str) -> Result<Hotel, DeskError> {
        self.directory
            .find_hotel(hotel_id)
            .await?
            .ok_or_else(|| DeskError::HotelNotFound(hotel_id.to_string()))
    }

    fn resolve<'a>(
        &self,
        hotel: &'a Hotel,
        global: &'a Catalog,
    ) -> Result<ActiveCatalog<'a>, DeskError> {
        resolve_active_catalog(hotel, Some(global))
            .map_err(|e| DeskError::from(self.record_failure(&hotel.id, e)))
    }

    fn record_failure(&self, hotel_id: &str, e: PricingError) -> PricingError {
        if !e.is_user_facing() {
            self.report_configuration_error(hotel_id, &e);
        } else if let PricingError::InvalidBookingRequest(reason) = &e {
            self.stats.requests_rejected.fetch_add(1, Ordering::SeqCst);
            debug!(hotel_id, reason = reason.code(), "Rejected booking request");
        }
        e
    }

    fn report_configuration_error(&self, hotel_id: &str, e: &PricingError) {
        self.stats.configuration_errors.fetch_add(1, Ordering::SeqCst);
        error!(hotel_id, error = %e, "Pricing configuration error");
    }
}
