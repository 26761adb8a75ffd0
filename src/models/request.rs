//! Forecast request model and validation

use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temperature units requested from the forecast endpoint.
///
/// The endpoint always delivers daily temperatures in centigrade; the unit
/// choice only affects how display lines are formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter
    #[must_use]
    pub fn as_query_value(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl FromStr for Units {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(ForecastError::invalid_request(format!(
                "unknown units '{other}', expected 'metric' or 'imperial'"
            ))),
        }
    }
}

/// Location identifier for the forecast query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationQuery {
    /// Numeric city id, sent as the `id` parameter. Preferred over name
    /// lookups, which fail for some cities (e.g. Bristol, UK).
    CityId(u64),
    /// Free-text city name, sent percent-encoded as the `q` parameter
    Name(String),
}

impl LocationQuery {
    /// Interpret user input as a city id when it is all digits,
    /// otherwise as a city name
    pub fn parse(input: &str) -> Result<Self, ForecastError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ForecastError::invalid_request("location cannot be empty"));
        }

        if let Ok(id) = input.parse::<u64>() {
            return Ok(LocationQuery::CityId(id));
        }

        Ok(LocationQuery::Name(input.to_string()))
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::CityId(id) => write!(f, "city id {id}"),
            LocationQuery::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// An immutable request for a multi-day daily forecast.
///
/// The response format is always JSON (`mode=json`); it is not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    location: LocationQuery,
    units: Units,
    day_count: u8,
}

impl ForecastRequest {
    /// Largest day count the endpoint accepts
    pub const MAX_DAY_COUNT: u8 = 16;

    /// Build a request, validating the day count (1–16)
    pub fn new(
        location: LocationQuery,
        units: Units,
        day_count: u8,
    ) -> Result<Self, ForecastError> {
        if day_count == 0 || day_count > Self::MAX_DAY_COUNT {
            return Err(ForecastError::invalid_request(format!(
                "day count must be between 1 and {}, got {day_count}",
                Self::MAX_DAY_COUNT
            )));
        }

        Ok(Self {
            location,
            units,
            day_count,
        })
    }

    #[must_use]
    pub fn location(&self) -> &LocationQuery {
        &self.location
    }

    #[must_use]
    pub fn units(&self) -> Units {
        self.units
    }

    #[must_use]
    pub fn day_count(&self) -> u8 {
        self.day_count
    }
}
