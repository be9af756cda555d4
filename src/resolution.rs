// Selection of the catalog that governs a given hotel

use tracing::warn;

use crate::catalog::{Catalog, Hotel};
use crate::error::PricingError;

/// The catalog actually governing a hotel after override/fallback resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveCatalog<'a> {
    // Hotel defers to the global catalog
    Inherited(&'a Catalog),
    // Hotel carries its own non-empty catalog
    Overridden(&'a Catalog),
}

impl<'a> ActiveCatalog<'a> {
    pub fn catalog(&self) -> &'a Catalog {
        match self {
            ActiveCatalog::Inherited(catalog) | ActiveCatalog::Overridden(catalog) => catalog,
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self, ActiveCatalog::Overridden(_))
    }
}

/// Resolve the active catalog for `hotel`.
///
/// A present but empty override is treated as malformed and falls back to
/// the global catalog. Fails only when no non-empty catalog is reachable.
pub fn resolve_active_catalog<'a>(
    hotel: &'a Hotel,
    global: Option<&'a Catalog>,
) -> Result<ActiveCatalog<'a>, PricingError> {
    match hotel.catalog_override.as_ref() {
        Some(own) if !own.is_empty() => return Ok(ActiveCatalog::Overridden(own)),
        Some(_) => warn!(
            hotel_id = %hotel.id,
            "Hotel catalog override has no room types, falling back to global catalog"
        ),
        None => {}
    }

    match global {
        Some(catalog) if !catalog.is_empty() => Ok(ActiveCatalog::Inherited(catalog)),
        _ => Err(PricingError::ConfigurationError(format!(
            "no usable catalog for hotel {}: override and global catalog are both absent or empty",
            hotel.id
        ))),
    }
}
