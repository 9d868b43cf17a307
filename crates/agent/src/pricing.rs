//! Simulated nightly pricing
//!
//! Base rate from the catalog (weekend rate when check-in falls on a Friday
//! or Saturday), multiplied by a uniform surge factor.

use chrono::{Datelike, NaiveDate, Weekday};
use hotel_concierge_config::PricingConfig;
use hotel_concierge_core::HotelInfo;
use rand::Rng;

/// Date format accepted for check-in dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Surge-priced rate estimator
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEstimator {
    surge_min: f64,
    surge_max: f64,
    default_room_code: String,
    fallback_price: f64,
}

impl Default for PriceEstimator {
    fn default() -> Self {
        Self::from_config(&PricingConfig::default())
    }
}

impl PriceEstimator {
    pub fn from_config(config: &PricingConfig) -> Self {
        Self {
            surge_min: config.surge_min,
            surge_max: config.surge_max,
            default_room_code: config.default_room_code.clone(),
            fallback_price: config.fallback_price,
        }
    }

    /// Room quoted when a price question names no room
    pub fn default_room_code(&self) -> &str {
        &self.default_room_code
    }

    /// Price quoted when the default room is missing from the catalog
    pub fn fallback_price(&self) -> f64 {
        self.fallback_price
    }

    /// Estimate the nightly price for `room_code`
    ///
    /// `None` when the room code is not in the catalog.
    pub fn estimate(&self, hotel: &HotelInfo, room_code: &str, check_in: Option<&str>) -> Option<f64> {
        self.estimate_with(&mut rand::thread_rng(), hotel, room_code, check_in)
    }

    /// Same as [`estimate`](Self::estimate) with an explicit random source
    pub fn estimate_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        hotel: &HotelInfo,
        room_code: &str,
        check_in: Option<&str>,
    ) -> Option<f64> {
        let Some(room) = hotel.room(room_code) else {
            tracing::warn!(room_code, "No catalog entry for room code");
            return None;
        };

        let base = if check_in.map(is_weekend_check_in).unwrap_or(false) {
            room.base_price_weekend
        } else {
            room.base_price_weekday
        };

        let surge = if self.surge_min < self.surge_max {
            rng.gen_range(self.surge_min..=self.surge_max)
        } else {
            self.surge_min
        };

        Some(round_cents(base * surge))
    }
}

/// Friday or Saturday check-in; unparseable dates count as weekdays
pub fn is_weekend_check_in(date: &str) -> bool {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|d| matches!(d.weekday(), Weekday::Fri | Weekday::Sat))
        .unwrap_or(false)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
