//! `daycast` - daily weather forecast fetching and formatting
//!
//! This library fetches a multi-day daily forecast from the OpenWeatherMap
//! daily-forecast endpoint, parses the JSON payload, and renders one
//! display line per day (`"Mon Jan 05 - Clear - 20/12"`). Refreshes are
//! single-flight: a newer request cancels the in-flight one and results
//! apply in issuance order.

pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod owm;
pub mod refresh;

// Re-export core types for public API
pub use config::DaycastConfig;
pub use error::ForecastError;
pub use fetch::{ForecastClient, ForecastSource};
pub use models::{DailyForecast, ForecastRequest, LocationQuery, Units};
pub use owm::{parse_forecast, reference_start_date, render_forecast};
pub use refresh::{DisplaySnapshot, FailedRefresh, RefreshCoordinator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;
