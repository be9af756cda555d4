// Global catalog storage with versioned, compare-and-swap replacement

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::SettingsConfig;
use crate::error::StoreError;
use crate::validation::validate_catalog_edit;

/// A catalog snapshot together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: Arc<T>,
}

#[derive(Debug, Default)]
pub struct StoreStats {
    pub reads: AtomicUsize,
    pub replacements: AtomicUsize,
    pub conflicts: AtomicUsize,
    pub rejected_edits: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreStatsReport {
    pub reads: usize,
    pub replacements: usize,
    pub conflicts: usize,
    pub rejected_edits: usize,
}

/// Owner of the process-wide global catalog.
///
/// Readers always get a complete `Arc<Catalog>`; writers must present the
/// version they read, so two administrators editing concurrently cannot
/// silently overwrite each other.
pub struct SettingsStore {
    global: RwLock<Versioned<Catalog>>,
    config: SettingsConfig,
    stats: StoreStats,
}

impl SettingsStore {
    /// Store seeded with the fixed default catalog.
    pub fn new(config: SettingsConfig) -> Self {
        Self::with_catalog(config, Catalog::default())
    }

    pub fn with_catalog(config: SettingsConfig, catalog: Catalog) -> Self {
        Self {
            global: RwLock::new(Versioned {
                version: 1,
                value: Arc::new(catalog),
            }),
            config,
            stats: StoreStats::default(),
        }
    }

    /// One-time initialization: seed from the configured settings file when it
    /// exists, otherwise from the fixed default catalog.
    pub fn initialize(config: SettingsConfig) -> Result<Self, StoreError> {
        let seeded = match config.settings_file.as_deref() {
            Some(path) if path.exists() => Some(load_settings_file(path)?),
            _ => None,
        };

        let catalog = match seeded {
            Some(catalog) => {
                info!(room_types = catalog.room_types.len(), "Initialized global catalog from settings file");
                catalog
            }
            None => {
                info!("Initializing global catalog with default room types");
                Catalog::default()
            }
        };

        Ok(Self::with_catalog(config, catalog))
    }

    pub fn config(&self) -> &SettingsConfig {
        &self.config
    }

    pub fn global(&self) -> Versioned<Catalog> {
        self.stats.reads.fetch_add(1, Ordering::SeqCst);
        self.global.read().clone()
    }

    /// Replace the global catalog if it is still at `expected_version`.
    ///
    /// Returns the new version. The stored catalog is left untouched when the
    /// candidate is invalid or the version has moved on.
    pub fn replace_global(&self, expected_version: u64, candidate: Catalog) -> Result<u64, StoreError> {
        let catalog = validate_catalog_edit(candidate).map_err(|e| {
            self.stats.rejected_edits.fetch_add(1, Ordering::SeqCst);
            e
        })?;

        let mut global = self.global.write();
        if global.version != expected_version {
            self.stats.conflicts.fetch_add(1, Ordering::SeqCst);
            warn!(
                expected = expected_version,
                actual = global.version,
                "Rejected stale global catalog edit"
            );
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: global.version,
            });
        }

        *global = Versioned {
            version: global.version + 1,
            value: Arc::new(catalog),
        };
        self.stats.replacements.fetch_add(1, Ordering::SeqCst);
        info!(version = global.version, "Replaced global catalog");

        Ok(global.version)
    }

    pub fn stats(&self) -> StoreStatsReport {
        StoreStatsReport {
            reads: self.stats.reads.load(Ordering::SeqCst),
            replacements: self.stats.replacements.load(Ordering::SeqCst),
            conflicts: self.stats.conflicts.load(Ordering::SeqCst),
            rejected_edits: self.stats.rejected_edits.load(Ordering::SeqCst),
        }
    }
}

// Seed files must pass the same checks as an administrator's edit
pub fn load_settings_file(path: &Path) -> Result<Catalog, StoreError> {
    let content = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    Ok(validate_catalog_edit(catalog)?)
}
