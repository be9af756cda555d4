// Which room types of a catalog can currently be booked

use crate::catalog::{Catalog, RoomType};

/// True iff at least one room type is available. An empty catalog is never bookable.
pub fn is_hotel_bookable(catalog: &Catalog) -> bool {
    catalog.room_types.iter().any(|rt| rt.available)
}

/// Available room types in catalog order.
///
/// An empty result means "fully booked" and is not an error.
pub fn available_room_types(catalog: &Catalog) -> Vec<&RoomType> {
    catalog.room_types.iter().filter(|rt| rt.available).collect()
}

// First available entry, the selection used when no room type is requested
pub fn default_room_type(catalog: &Catalog) -> Option<&RoomType> {
    catalog.room_types.iter().find(|rt| rt.available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn mixed() -> Catalog {
        Catalog::new(
            vec![
                RoomType::new("Single Room", 1.0, 1).unavailable(),
                RoomType::new("Double Room", 1.5, 2),
                RoomType::new("Deluxe Room", 2.2, 3).unavailable(),
                RoomType::new("Suite", 3.5, 4),
            ],
            1000.0,
        )
    }

    fn all_unavailable() -> Catalog {
        Catalog::new(
            vec![
                RoomType::new("Single Room", 1.0, 1).unavailable(),
                RoomType::new("Suite", 3.5, 4).unavailable(),
            ],
            1000.0,
        )
    }

    #[test]
    fn test_available_room_types_keep_catalog_order() {
        let catalog = mixed();
        let names: Vec<&str> = available_room_types(&catalog)
            .iter()
            .map(|rt| rt.name.as_str())
            .collect();
        assert_eq!(names, vec!["Double Room", "Suite"]);
    }

    #[test]
    fn test_default_selection_is_first_available() {
        let catalog = mixed();
        assert_eq!(default_room_type(&catalog).unwrap().name, "Double Room");
        assert!(default_room_type(&all_unavailable()).is_none());
    }

    #[test_case(Catalog::default(), true; "default catalog")]
    #[test_case(mixed(), true; "partially available")]
    #[test_case(all_unavailable(), false; "all unavailable")]
    #[test_case(Catalog::new(vec![], 1000.0), false; "empty catalog")]
    fn test_bookable_agrees_with_available_list(catalog: Catalog, bookable: bool) {
        assert_eq!(is_hotel_bookable(&catalog), bookable);
        assert_eq!(
            is_hotel_bookable(&catalog),
            !available_room_types(&catalog).is_empty()
        );
    }
}
