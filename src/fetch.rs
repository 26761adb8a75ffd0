//! HTTP client for the daily-forecast endpoint
//!
//! One GET per request, no retries: a failed fetch surfaces as a structured
//! error and the caller decides what to do with it.

use crate::config::DaycastConfig;
use crate::error::ForecastError;
use crate::models::{ForecastRequest, LocationQuery};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Source of raw forecast payloads.
///
/// The HTTP client implements this; tests substitute stub sources so the
/// refresh coordinator can be exercised without a network.
#[async_trait]
pub trait ForecastSource: Send + Sync + 'static {
    /// Fetch the raw JSON payload for a request
    async fn fetch(&self, request: &ForecastRequest) -> Result<String, ForecastError>;
}

/// HTTP client for the daily-forecast endpoint
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    /// Create a new client with the configured endpoint and timeout
    pub fn new(config: &DaycastConfig) -> Result<Self, ForecastError> {
        let timeout = Duration::from_secs(config.endpoint.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("daycast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.endpoint.base_url.clone(),
        })
    }

    /// Build the query URL:
    /// `<base>?{id|q}=<loc>&mode=json&units=<units>&cnt=<days>`
    fn request_url(&self, request: &ForecastRequest) -> String {
        let location = match request.location() {
            LocationQuery::CityId(id) => format!("id={id}"),
            LocationQuery::Name(name) => format!("q={}", urlencoding::encode(name)),
        };

        format!(
            "{}?{}&mode=json&units={}&cnt={}",
            self.base_url,
            location,
            request.units().as_query_value(),
            request.day_count()
        )
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch(&self, request: &ForecastRequest) -> Result<String, ForecastError> {
        let url = self.request_url(request);
        debug!("forecast request URL: {}", url);
        let started = Instant::now();

        // Non-success statuses become Network errors here rather than
        // letting an HTML error page reach the parser.
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        if body.trim().is_empty() {
            warn!("forecast endpoint returned an empty body for {}", request.location());
            return Err(ForecastError::EmptyBody);
        }

        info!(
            "retrieved {} bytes for {} in {:.3}s",
            body.len(),
            request.location(),
            started.elapsed().as_secs_f64()
        );
        trace!("raw forecast payload: {}", body);

        Ok(body)
    }
}
