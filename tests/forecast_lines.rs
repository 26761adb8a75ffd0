//! End-to-end parse-and-format tests over a recorded endpoint payload

use chrono::NaiveDate;
use daycast::{
    parse_forecast, render_forecast, ForecastError, ForecastRequest, LocationQuery, Units,
};
use rstest::rstest;

const FIXTURE: &str = include_str!("ref/owm-daily.json");

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 5).unwrap()
}

fn bristol(units: Units, day_count: u8) -> ForecastRequest {
    ForecastRequest::new(LocationQuery::CityId(2654675), units, day_count).unwrap()
}

#[test]
fn fixture_renders_one_line_per_day() {
    let lines = render_forecast(FIXTURE, &bristol(Units::Metric, 7), monday()).unwrap();
    assert_eq!(
        lines,
        vec![
            "Mon Jan 05 - Clear - 20/12",
            "Tue Jan 06 - Rain - 18/11",
            "Wed Jan 07 - Clouds - 16/10",
            "Thu Jan 08 - Fog - 15/9",
            "Fri Jan 09 - Rain - 14/8",
            "Sat Jan 10 - Snow - 12/6",
            "Sun Jan 11 - Clouds - 11/5",
        ]
    );
}

#[test]
fn fixture_known_temperatures_in_both_units() {
    let metric = render_forecast(FIXTURE, &bristol(Units::Metric, 7), monday()).unwrap();
    assert!(metric[0].ends_with("20/12"), "got {}", metric[0]);

    // 20.17C -> 68.3F -> 68, 12.3C -> 54.1F -> 54
    let imperial = render_forecast(FIXTURE, &bristol(Units::Imperial, 7), monday()).unwrap();
    assert!(imperial[0].ends_with("68/54"), "got {}", imperial[0]);
}

#[test]
fn imperial_lines_match_converted_metric_values() {
    let days = parse_forecast(FIXTURE, 7, monday()).unwrap();
    for day in &days {
        let expected_high = (day.high_c * 9.0 / 5.0 + 32.0).round() as i64;
        let expected_low = (day.low_c * 9.0 / 5.0 + 32.0).round() as i64;
        let line = day.display_line(Units::Imperial);
        assert!(
            line.ends_with(&format!("{expected_high}/{expected_low}")),
            "line {line} does not match {expected_high}/{expected_low}"
        );
    }
}

#[rstest]
#[case(3, 3)] // fewer requested than available: capped at requested
#[case(7, 7)] // exact
#[case(16, 7)] // more requested than available: capped at available
fn output_length_is_min_of_requested_and_available(
    #[case] requested: u8,
    #[case] expected: usize,
) {
    let days = parse_forecast(FIXTURE, requested, monday()).unwrap();
    assert_eq!(days.len(), expected);
}

#[test]
fn dates_are_consecutive_from_reference_date() {
    let days = parse_forecast(FIXTURE, 7, monday()).unwrap();
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.date, monday() + chrono::Duration::days(i as i64));
    }
}

#[rstest]
#[case("hello")]
#[case("")]
#[case("{\"cod\":\"404\",\"message\":\"city not found\"}")]
fn malformed_payloads_are_rejected(#[case] payload: &str) {
    let err = parse_forecast(payload, 7, monday()).unwrap_err();
    assert!(matches!(err, ForecastError::MalformedPayload(_)));
    assert!(!err.is_retryable());
}
