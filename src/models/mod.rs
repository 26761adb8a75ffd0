//! Data models for forecast requests and parsed forecasts

pub mod forecast;
pub mod request;

pub use forecast::DailyForecast;
pub use request::{ForecastRequest, LocationQuery, Units};
