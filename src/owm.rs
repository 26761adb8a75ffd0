//! OpenWeatherMap daily-forecast payload parsing
//!
//! Wire structs for the `/data/2.5/forecast/daily` JSON response and the
//! transformation into [`DailyForecast`] values and display lines.

use crate::error::ForecastError;
use crate::models::{DailyForecast, ForecastRequest};
use chrono::{DateTime, Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

/// Top-level daily-forecast response; one `list` entry per day
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<DayEntry>,
}

#[derive(Debug, Deserialize)]
struct DayEntry {
    /// Condition summaries; the endpoint sends a single-element array
    weather: Vec<Condition>,
    temp: Temperature,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
}

/// Temperatures are centigrade regardless of the requested display units
#[derive(Debug, Deserialize)]
struct Temperature {
    max: f64,
    min: f64,
}

/// Reference date for day 0 of the forecast.
///
/// The endpoint returns daily entries based on the queried city's local
/// time, with the first entry always "today". Taking the local calendar
/// day at parse start and treating it as a plain date from then on
/// normalizes every entry to a timezone-independent day, which is all the
/// display format needs. Callers pass the result into [`parse_forecast`]
/// so parsing itself never reads the clock.
#[must_use]
pub fn reference_start_date(now: DateTime<Local>) -> NaiveDate {
    now.date_naive()
}

/// Parse a raw JSON payload into per-day forecasts.
///
/// Entry `i` of the payload's `list` array is dated `today + i` days; the
/// entries carry no usable ordering information beyond their position.
/// Output length is `min(day_count, entries present)`. The parse is
/// atomic: a malformed entry anywhere fails the whole call with
/// [`ForecastError::MalformedPayload`] and no partial output.
pub fn parse_forecast(
    payload: &str,
    day_count: u8,
    today: NaiveDate,
) -> Result<Vec<DailyForecast>, ForecastError> {
    let response: ForecastResponse = serde_json::from_str(payload)?;

    let available = response.list.len();
    let take = usize::from(day_count).min(available);
    if available != usize::from(day_count) {
        debug!(
            requested = day_count,
            available, "payload entry count differs from requested day count"
        );
    }

    let mut days = Vec::with_capacity(take);
    for (i, entry) in response.list.into_iter().take(take).enumerate() {
        let condition = entry
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ForecastError::malformed("day entry has an empty 'weather' array"))?
            .main;

        days.push(DailyForecast {
            date: today + chrono::Duration::days(i as i64),
            condition,
            high_c: entry.temp.max,
            low_c: entry.temp.min,
        });
    }

    Ok(days)
}

/// Parse a payload and format it as display lines in the request's units
pub fn render_forecast(
    payload: &str,
    request: &ForecastRequest,
    today: NaiveDate,
) -> Result<Vec<String>, ForecastError> {
    let days = parse_forecast(payload, request.day_count(), today)?;
    Ok(days
        .iter()
        .map(|day| day.display_line(request.units()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationQuery, Units};

    fn day_entry(condition: &str, max: f64, min: f64) -> String {
        format!(
            r#"{{"weather":[{{"main":"{condition}","description":"ignored"}}],"temp":{{"max":{max},"min":{min},"day":15.0}},"dt":1400356800}}"#
        )
    }

    fn payload(entries: &[String]) -> String {
        format!(r#"{{"cod":"200","list":[{}]}}"#, entries.join(","))
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 1, 5).unwrap()
    }

    #[test]
    fn test_parse_dates_consecutive_from_reference() {
        let body = payload(&[
            day_entry("Clear", 20.0, 10.0),
            day_entry("Rain", 18.0, 9.0),
            day_entry("Clouds", 16.0, 8.0),
        ]);

        let days = parse_forecast(&body, 3, monday()).unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, monday());
        assert_eq!(days[1].date, monday() + chrono::Duration::days(1));
        assert_eq!(days[2].date, monday() + chrono::Duration::days(2));
        assert_eq!(days[1].condition, "Rain");
    }

    #[test]
    fn test_parse_short_list_yields_fewer_days() {
        let body = payload(&[day_entry("Clear", 20.0, 10.0), day_entry("Rain", 18.0, 9.0)]);
        let days = parse_forecast(&body, 7, monday()).unwrap();
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn test_parse_long_list_capped_at_requested() {
        let entries: Vec<String> = (0..10).map(|i| day_entry("Clear", 20.0 + f64::from(i), 10.0)).collect();
        let days = parse_forecast(&payload(&entries), 7, monday()).unwrap();
        assert_eq!(days.len(), 7);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_forecast("hello", 7, monday()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_empty_payload() {
        let err = parse_forecast("", 7, monday()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_missing_list() {
        let err = parse_forecast(r#"{"cod":"200"}"#, 7, monday()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_missing_temp_field() {
        let body = r#"{"list":[{"weather":[{"main":"Clear"}],"temp":{"max":20.0}}]}"#;
        let err = parse_forecast(body, 7, monday()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_atomic_on_bad_entry() {
        // First entry fine, second has an empty weather array: no partial output.
        let body = payload(&[
            day_entry("Clear", 20.0, 10.0),
            r#"{"weather":[],"temp":{"max":18.0,"min":9.0}}"#.to_string(),
        ]);
        let err = parse_forecast(&body, 7, monday()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
    }

    #[test]
    fn test_render_known_fixture_temperatures() {
        let body = payload(&[day_entry("Clear", 20.17, 12.3)]);

        let metric =
            ForecastRequest::new(LocationQuery::CityId(2654675), Units::Metric, 7).unwrap();
        assert_eq!(
            render_forecast(&body, &metric, monday()).unwrap(),
            vec!["Mon Jan 05 - Clear - 20/12".to_string()]
        );

        let imperial =
            ForecastRequest::new(LocationQuery::CityId(2654675), Units::Imperial, 7).unwrap();
        assert_eq!(
            render_forecast(&body, &imperial, monday()).unwrap(),
            vec!["Mon Jan 05 - Clear - 68/54".to_string()]
        );
    }

    #[test]
    fn test_reference_start_date_is_local_calendar_day() {
        let now = Local::now();
        assert_eq!(reference_start_date(now), now.date_naive());
    }
}
