// Consistency checks applied to a catalog before it replaces a stored one

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::error::{CatalogViolation, PricingError};

/// Validate an administrator's catalog edit.
///
/// The candidate is returned unchanged on success so callers can hand it
/// straight to the store; edits always replace a whole catalog.
pub fn validate_catalog_edit(candidate: Catalog) -> Result<Catalog, PricingError> {
    if candidate.room_types.is_empty() {
        return Err(CatalogViolation::NoRoomTypes.into());
    }

    if !candidate.extra_guest_charge.is_finite() || candidate.extra_guest_charge < 0.0 {
        return Err(CatalogViolation::InvalidExtraGuestCharge(candidate.extra_guest_charge).into());
    }

    let mut seen = HashSet::new();
    for (index, room_type) in candidate.room_types.iter().enumerate() {
        if room_type.name.trim().is_empty() {
            return Err(CatalogViolation::BlankName { index }.into());
        }

        if !seen.insert(room_type.name.as_str()) {
            return Err(CatalogViolation::DuplicateName(room_type.name.clone()).into());
        }

        if !room_type.base_modifier.is_finite() || room_type.base_modifier < 0.0 {
            return Err(CatalogViolation::InvalidModifier {
                name: room_type.name.clone(),
                value: room_type.base_modifier,
            }
            .into());
        }

        if room_type.max_guests < 1 {
            return Err(CatalogViolation::InvalidMaxGuests {
                name: room_type.name.clone(),
            }
            .into());
        }
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoomType;
    use test_case::test_case;

    fn two_suites() -> Catalog {
        Catalog::new(
            vec![RoomType::new("Suite", 3.5, 4), RoomType::new("Suite", 2.0, 2)],
            1000.0,
        )
    }

    fn zero_guest_room() -> Catalog {
        Catalog::new(vec![RoomType::new("Closet", 0.5, 0)], 1000.0)
    }

    fn negative_surcharge() -> Catalog {
        Catalog::new(vec![RoomType::new("Single Room", 1.0, 1)], -1.0)
    }

    fn negative_modifier() -> Catalog {
        Catalog::new(vec![RoomType::new("Promo", -0.5, 2)], 0.0)
    }

    fn blank_name() -> Catalog {
        Catalog::new(
            vec![RoomType::new("Single Room", 1.0, 1), RoomType::new("   ", 1.0, 1)],
            0.0,
        )
    }

    fn nan_modifier() -> Catalog {
        Catalog::new(vec![RoomType::new("Glitch", f64::NAN, 1)], 0.0)
    }

    #[test_case(two_suites(), CatalogViolation::DuplicateName("Suite".into()); "duplicate suite")]
    #[test_case(zero_guest_room(), CatalogViolation::InvalidMaxGuests { name: "Closet".into() }; "zero max guests")]
    #[test_case(negative_surcharge(), CatalogViolation::InvalidExtraGuestCharge(-1.0); "negative surcharge")]
    #[test_case(blank_name(), CatalogViolation::BlankName { index: 1 }; "blank name")]
    #[test_case(Catalog::new(vec![], 0.0), CatalogViolation::NoRoomTypes; "empty catalog")]
    fn test_rejected_edits(candidate: Catalog, expected: CatalogViolation) {
        let result = validate_catalog_edit(candidate);
        assert_eq!(result, Err(PricingError::InvalidCatalog(expected)));
    }

    #[test]
    fn test_negative_modifier_rejected() {
        let result = validate_catalog_edit(negative_modifier());
        assert!(matches!(
            result,
            Err(PricingError::InvalidCatalog(CatalogViolation::InvalidModifier { ref name, .. })) if name == "Promo"
        ));
    }

    #[test]
    fn test_non_finite_modifier_rejected() {
        assert!(validate_catalog_edit(nan_modifier()).is_err());
    }

    #[test]
    fn test_valid_edit_returned_unchanged() {
        let candidate = Catalog::new(
            vec![
                RoomType::new("Dorm Bed", 0.0, 1),
                RoomType::new("Family Room", 2.5, 5).unavailable(),
            ],
            0.0,
        );

        let accepted = validate_catalog_edit(candidate.clone()).unwrap();
        assert_eq!(accepted, candidate);
    }

    #[test]
    fn test_default_catalog_is_valid() {
        assert!(validate_catalog_edit(Catalog::default()).is_ok());
    }
}
