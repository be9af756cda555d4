// Configuration for the pricing engine and the settings store

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    // ISO 4217 code stamped on quotes and bookings
    pub currency: String,
    // Optional cap on guests per booking, None means unlimited
    pub max_guests_per_booking: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            max_guests_per_booking: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsConfig {
    // Seed for the global catalog, read once when present
    pub settings_file: Option<PathBuf>,
    // Give newly registered hotels their own copy of the global catalog
    pub snapshot_global_on_create: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            settings_file: Some(PathBuf::from("data/settings.json")),
            snapshot_global_on_create: false,
        }
    }
}
