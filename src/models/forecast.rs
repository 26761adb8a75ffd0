//! Parsed per-day forecast data and display formatting

use super::Units;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of parsed forecast data.
///
/// Temperatures are kept in centigrade exactly as delivered by the endpoint;
/// unit conversion happens at display time. Instances only live for the
/// duration of one parse-and-format cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Calendar date for this entry, normalized to a plain UTC day
    pub date: NaiveDate,
    /// Short condition summary (e.g. "Clear", "Rain")
    pub condition: String,
    /// High temperature in centigrade
    pub high_c: f64,
    /// Low temperature in centigrade
    pub low_c: f64,
}

impl DailyForecast {
    /// High temperature converted to the requested units
    #[must_use]
    pub fn high_in(&self, units: Units) -> f64 {
        convert_temperature(self.high_c, units)
    }

    /// Low temperature converted to the requested units
    #[must_use]
    pub fn low_in(&self, units: Units) -> f64 {
        convert_temperature(self.low_c, units)
    }

    /// Format this entry as a display line: `"Mon Jan 05 - Clear - 20/12"`.
    ///
    /// Temperatures are rounded half-away-from-zero to whole degrees.
    #[must_use]
    pub fn display_line(&self, units: Units) -> String {
        format!(
            "{} - {} - {}/{}",
            self.date.format("%a %b %d"),
            self.condition,
            round_whole(self.high_in(units)),
            round_whole(self.low_in(units)),
        )
    }
}

/// Convert a centigrade temperature to the requested units
#[must_use]
pub fn convert_temperature(centigrade: f64, units: Units) -> f64 {
    match units {
        Units::Metric => centigrade,
        Units::Imperial => centigrade * 9.0 / 5.0 + 32.0,
    }
}

/// Round to the nearest whole degree, ties away from zero
#[must_use]
pub fn round_whole(temperature: f64) -> i64 {
    temperature.round() as i64
}
