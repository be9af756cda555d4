// Room-type catalogs and the hotel records that carry them

use serde::{Deserialize, Serialize};

// A bookable category of room inside a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub name: String,
    // Multiplies the hotel's nightly base price
    pub base_modifier: f64,
    pub max_guests: u32,
    pub available: bool,
}

impl RoomType {
    pub fn new(name: &str, base_modifier: f64, max_guests: u32) -> Self {
        Self {
            name: name.to_string(),
            base_modifier,
            max_guests,
            available: true,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Nightly rate of this room type for a hotel charging `base_price` per night.
    pub fn nightly_rate(&self, base_price: f64) -> f64 {
        base_price * self.base_modifier
    }
}

/// Ordered room types plus the flat per-guest, per-night surcharge.
///
/// Order is presentation order and also decides the default selection:
/// the first available entry wins when a request names no room type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    #[serde(default)]
    pub extra_guest_charge: f64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            room_types: vec![
                RoomType::new("Single Room", 1.0, 1),
                RoomType::new("Double Room", 1.5, 2),
                RoomType::new("Deluxe Room", 2.2, 3),
                RoomType::new("Suite", 3.5, 4),
            ],
            extra_guest_charge: 1000.0,
        }
    }
}

impl Catalog {
    pub fn new(room_types: Vec<RoomType>, extra_guest_charge: f64) -> Self {
        Self {
            room_types,
            extra_guest_charge,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.room_types.is_empty()
    }

    // Exact, case-sensitive name match
    pub fn room_type(&self, name: &str) -> Option<&RoomType> {
        self.room_types.iter().find(|rt| rt.name == name)
    }
}

pub type HotelId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub city: String,
    // Nightly price before any room-type modifier
    pub base_price: f64,
    #[serde(default, alias = "settings", skip_serializing_if = "Option::is_none")]
    pub catalog_override: Option<Catalog>,
    // Bumped on every override replacement
    #[serde(default)]
    pub revision: u64,
}

impl Hotel {
    pub fn new(id: &str, name: &str, city: &str, base_price: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            base_price,
            catalog_override: None,
            revision: 0,
        }
    }

    pub fn with_override(mut self, catalog: Catalog) -> Self {
        self.catalog_override = Some(catalog);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_matches_first_run_seed() {
        let catalog = Catalog::default();

        let names: Vec<&str> = catalog.room_types.iter().map(|rt| rt.name.as_str()).collect();
        assert_eq!(names, vec!["Single Room", "Double Room", "Deluxe Room", "Suite"]);

        let modifiers: Vec<f64> = catalog.room_types.iter().map(|rt| rt.base_modifier).collect();
        assert_eq!(modifiers, vec![1.0, 1.5, 2.2, 3.5]);

        assert!(catalog.room_types.iter().all(|rt| rt.available));
        assert_eq!(catalog.extra_guest_charge, 1000.0);
    }

    #[test]
    fn test_room_type_lookup_is_exact() {
        let catalog = Catalog::default();
        assert!(catalog.room_type("Suite").is_some());
        assert!(catalog.room_type("suite").is_none());
        assert!(catalog.room_type("Suite ").is_none());
    }

    #[test]
    fn test_catalog_wire_format() {
        let json = r#"{
            "roomTypes": [
                { "name": "Cottage", "baseModifier": 1.8, "maxGuests": 3, "available": false }
            ],
            "extraGuestCharge": 750
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.room_types.len(), 1);
        assert_eq!(catalog.room_types[0].name, "Cottage");
        assert_eq!(catalog.room_types[0].max_guests, 3);
        assert!(!catalog.room_types[0].available);
        assert_eq!(catalog.extra_guest_charge, 750.0);
    }

    #[test]
    fn test_hotel_accepts_legacy_settings_field() {
        let json = r#"{
            "id": "h1",
            "name": "Marina Bay Inn",
            "city": "Chennai",
            "basePrice": 2500,
            "settings": { "roomTypes": [], "extraGuestCharge": 0 }
        }"#;

        let hotel: Hotel = serde_json::from_str(json).unwrap();
        assert_eq!(hotel.revision, 0);
        assert!(hotel.catalog_override.unwrap().is_empty());
    }
}
