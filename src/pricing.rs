// Pricing engine: turns a hotel's base price, its active catalog and a stay into a price breakdown
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::availability::is_hotel_bookable;
use crate::catalog::{Catalog, HotelId};
use crate::config::EngineConfig;
use crate::error::{PricingError, RejectionReason};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

// Booking request as carried by a JSON request body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub hotel_id: HotelId,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    // Signed so that negative counts reach the engine and get a reason code
    #[serde(default, deserialize_with = "deserialize_guests")]
    pub guests: i64,
    #[serde(default, alias = "roomType")]
    pub room_type_name: String,
}

impl BookingRequest {
    pub fn new(hotel_id: &str, check_in: &str, check_out: &str, guests: u32, room_type: &str) -> Self {
        Self {
            hotel_id: hotel_id.to_string(),
            check_in: Some(check_in.to_string()),
            check_out: Some(check_out.to_string()),
            guests: i64::from(guests),
            room_type_name: room_type.to_string(),
        }
    }
}

// Guest counts arrive as numbers or, from HTML form inputs, as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGuests {
    Count(i64),
    Text(String),
}

fn deserialize_guests<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawGuests::deserialize(deserializer)? {
        RawGuests::Count(count) => count,
        // Unreadable text counts as no guests and is rejected as such
        RawGuests::Text(text) => text.trim().parse().unwrap_or(0),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub nights: u32,
    pub room_type_used: String,
    pub nightly_room_rate: f64,
    pub room_cost: f64,
    pub extra_guests: u32,
    pub extra_guest_cost: f64,
    pub total: f64,
}

// Validated stay boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
}

impl Stay {
    /// Parse and order-check raw check-in/check-out values.
    pub fn parse(check_in: Option<&str>, check_out: Option<&str>) -> Result<Self, RejectionReason> {
        let raw_in = check_in
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RejectionReason::MissingCheckIn)?;
        let raw_out = check_out
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RejectionReason::MissingCheckOut)?;

        let check_in = parse_stay_date(raw_in)
            .ok_or_else(|| RejectionReason::UnparseableCheckIn(raw_in.to_string()))?;
        let check_out = parse_stay_date(raw_out)
            .ok_or_else(|| RejectionReason::UnparseableCheckOut(raw_out.to_string()))?;

        if check_out <= check_in {
            return Err(RejectionReason::CheckOutNotAfterCheckIn);
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Whole nights covered by the stay, rounded up and never below one.
    pub fn nights(&self) -> u32 {
        let seconds = (self.check_out - self.check_in).num_seconds().max(0);
        let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
        u32::try_from(days).unwrap_or(u32::MAX).max(1)
    }
}

// Accepts plain dates, local date-times and RFC 3339 timestamps. Offsets are
// dropped, keeping the wall-clock time, so every input kind is compared as
// hotel-local time.
fn parse_stay_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime);
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.naive_local())
}

#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: EngineConfig,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the price of `request` against `catalog`.
    ///
    /// The result depends only on the arguments, so a quote shown before
    /// booking and the price stored on the booking always agree. Nothing
    /// is computed unless every precondition holds.
    pub fn compute_price(
        &self,
        hotel_base_price: f64,
        catalog: &Catalog,
        request: &BookingRequest,
    ) -> Result<PriceBreakdown, PricingError> {
        if !hotel_base_price.is_finite() || hotel_base_price <= 0.0 {
            return Err(PricingError::ConfigurationError(format!(
                "hotel {} has invalid base price {}",
                request.hotel_id, hotel_base_price
            )));
        }
        if !catalog.extra_guest_charge.is_finite() || catalog.extra_guest_charge < 0.0 {
            return Err(PricingError::ConfigurationError(format!(
                "catalog has invalid extra guest charge {}",
                catalog.extra_guest_charge
            )));
        }

        let stay = Stay::parse(request.check_in.as_deref(), request.check_out.as_deref())?;

        if request.guests < 1 {
            return Err(RejectionReason::NoGuests.into());
        }
        let guests = u32::try_from(request.guests).unwrap_or(u32::MAX);
        if let Some(limit) = self.config.max_guests_per_booking {
            if guests > limit {
                return Err(RejectionReason::TooManyGuests {
                    requested: guests,
                    limit,
                }
                .into());
            }
        }

        if !is_hotel_bookable(catalog) {
            return Err(RejectionReason::FullyBooked.into());
        }

        let room_type = catalog
            .room_type(&request.room_type_name)
            .ok_or_else(|| RejectionReason::UnknownRoomType(request.room_type_name.clone()))?;
        if !room_type.available {
            return Err(RejectionReason::RoomTypeUnavailable(room_type.name.clone()).into());
        }
        if !room_type.base_modifier.is_finite() || room_type.base_modifier < 0.0 {
            return Err(PricingError::ConfigurationError(format!(
                "room type '{}' has invalid price multiplier {}",
                room_type.name, room_type.base_modifier
            )));
        }

        let nights = stay.nights();
        let nightly_room_rate = room_type.nightly_rate(hotel_base_price);
        let room_cost = nightly_room_rate * f64::from(nights);
        let extra_guests = guests.saturating_sub(room_type.max_guests);
        let extra_guest_cost =
            f64::from(extra_guests) * catalog.extra_guest_charge * f64::from(nights);
        let total = room_cost + extra_guest_cost;
        if !total.is_finite() {
            return Err(PricingError::ConfigurationError(format!(
                "price of hotel {} overflows for {} nights",
                request.hotel_id, nights
            )));
        }

        debug!(
            hotel_id = %request.hotel_id,
            room_type = %room_type.name,
            nights,
            extra_guests,
            total,
            "Computed stay price"
        );

        Ok(PriceBreakdown {
            nights,
            room_type_used: room_type.name.clone(),
            nightly_room_rate,
            room_cost,
            extra_guests,
            extra_guest_cost,
            total,
        })
    }
}

/// [`PricingEngine::compute_price`] with the default engine configuration.
pub fn compute_price(
    hotel_base_price: f64,
    catalog: &Catalog,
    request: &BookingRequest,
) -> Result<PriceBreakdown, PricingError> {
    PricingEngine::default().compute_price(hotel_base_price, catalog, request)
}
