// Stay pricing and room availability for a hotel booking marketplace

pub mod availability;
pub mod booking_desk;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod pricing;
pub mod resolution;
pub mod settings_store;
pub mod validation;

// Re-export key types for convenience
pub use availability::{available_room_types, default_room_type, is_hotel_bookable};
pub use booking_desk::{
    Booking, BookingDesk, BookingStatus, CatalogSource, DeskError, DeskStatsReport, HotelListing,
    Quote, RoomOption,
};
pub use catalog::{Catalog, Hotel, HotelId, RoomType};
pub use config::{EngineConfig, SettingsConfig};
pub use directory::{HotelDirectory, InMemoryHotelDirectory};
pub use error::{CatalogViolation, PricingError, RejectionReason, StoreError};
pub use pricing::{compute_price, BookingRequest, PriceBreakdown, PricingEngine, Stay};
pub use resolution::{resolve_active_catalog, ActiveCatalog};
pub use settings_store::{SettingsStore, StoreStatsReport, Versioned};
pub use validation::validate_catalog_edit;
