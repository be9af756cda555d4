// Error types for pricing, catalog edits and the settings store
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    // Operational alarm: no usable catalog or broken hotel data
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid booking request: {0}")]
    InvalidBookingRequest(RejectionReason),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(CatalogViolation),
}

impl PricingError {
    /// Whether the condition should be shown to the end user as a validation error.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, PricingError::ConfigurationError(_))
    }
}

impl From<RejectionReason> for PricingError {
    fn from(reason: RejectionReason) -> Self {
        PricingError::InvalidBookingRequest(reason)
    }
}

impl From<CatalogViolation> for PricingError {
    fn from(violation: CatalogViolation) -> Self {
        PricingError::InvalidCatalog(violation)
    }
}

/// Why a booking request was turned down.
///
/// Every variant maps to a stable reason code through [`RejectionReason::code`]
/// so a UI can show a precise message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    MissingCheckIn,
    MissingCheckOut,
    UnparseableCheckIn(String),
    UnparseableCheckOut(String),
    CheckOutNotAfterCheckIn,
    NoGuests,
    TooManyGuests { requested: u32, limit: u32 },
    FullyBooked,
    UnknownRoomType(String),
    RoomTypeUnavailable(String),
}

impl RejectionReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::MissingCheckIn => "missing_check_in",
            RejectionReason::MissingCheckOut => "missing_check_out",
            RejectionReason::UnparseableCheckIn(_) => "unparseable_check_in",
            RejectionReason::UnparseableCheckOut(_) => "unparseable_check_out",
            RejectionReason::CheckOutNotAfterCheckIn => "check_out_not_after_check_in",
            RejectionReason::NoGuests => "no_guests",
            RejectionReason::TooManyGuests { .. } => "too_many_guests",
            RejectionReason::FullyBooked => "fully_booked",
            RejectionReason::UnknownRoomType(_) => "unknown_room_type",
            RejectionReason::RoomTypeUnavailable(_) => "room_type_unavailable",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingCheckIn => write!(f, "check-in date is required"),
            RejectionReason::MissingCheckOut => write!(f, "check-out date is required"),
            RejectionReason::UnparseableCheckIn(raw) => {
                write!(f, "check-in date '{}' is not a valid date", raw)
            }
            RejectionReason::UnparseableCheckOut(raw) => {
                write!(f, "check-out date '{}' is not a valid date", raw)
            }
            RejectionReason::CheckOutNotAfterCheckIn => {
                write!(f, "check-out must be after check-in")
            }
            RejectionReason::NoGuests => write!(f, "at least one guest is required"),
            RejectionReason::TooManyGuests { requested, limit } => write!(
                f,
                "{} guests requested, at most {} allowed per booking",
                requested, limit
            ),
            RejectionReason::FullyBooked => write!(f, "hotel is fully booked"),
            RejectionReason::UnknownRoomType(name) => write!(f, "unknown room type '{}'", name),
            RejectionReason::RoomTypeUnavailable(name) => {
                write!(f, "room type '{}' is not available", name)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogViolation {
    #[error("catalog has no room types")]
    NoRoomTypes,

    #[error("room type at position {index} has a blank name")]
    BlankName { index: usize },

    #[error("room type name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("room type '{name}' has invalid price multiplier {value}")]
    InvalidModifier { name: String, value: f64 },

    #[error("room type '{name}' must allow at least one guest")]
    InvalidMaxGuests { name: String },

    #[error("extra guest charge {0} must be a non-negative amount")]
    InvalidExtraGuestCharge(f64),
}

// Errors raised by the settings store and the hotel directory
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("Hotel not found: {0}")]
    HotelNotFound(String),

    #[error("Hotel already registered: {0}")]
    DuplicateHotel(String),

    #[error(transparent)]
    Rejected(#[from] PricingError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RejectionReason::MissingCheckIn, "missing_check_in"; "missing check-in")]
    #[test_case(RejectionReason::CheckOutNotAfterCheckIn, "check_out_not_after_check_in"; "reversed dates")]
    #[test_case(RejectionReason::UnknownRoomType("Loft".into()), "unknown_room_type"; "unknown room type")]
    #[test_case(RejectionReason::TooManyGuests { requested: 12, limit: 10 }, "too_many_guests"; "guest cap")]
    fn test_reason_codes(reason: RejectionReason, code: &str) {
        assert_eq!(reason.code(), code);
    }

    #[test]
    fn test_configuration_error_is_not_user_facing() {
        assert!(!PricingError::ConfigurationError("no catalog".into()).is_user_facing());
        assert!(PricingError::from(RejectionReason::NoGuests).is_user_facing());
        assert!(PricingError::from(CatalogViolation::NoRoomTypes).is_user_facing());
    }

    #[test]
    fn test_error_messages() {
        let err = PricingError::from(RejectionReason::RoomTypeUnavailable("Suite".into()));
        assert_eq!(
            err.to_string(),
            "Invalid booking request: room type 'Suite' is not available"
        );

        let err = PricingError::from(CatalogViolation::DuplicateName("Suite".into()));
        assert_eq!(
            err.to_string(),
            "Invalid catalog: room type name 'Suite' is used more than once"
        );
    }
}
