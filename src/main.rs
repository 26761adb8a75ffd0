use anyhow::{Context, Result};
use daycast::{
    DaycastConfig, ForecastClient, ForecastRequest, LocationQuery, RefreshCoordinator, Units,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = DaycastConfig::load().context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let request = request_from_args(&config)?;

    let client = ForecastClient::new(&config)?;
    let coordinator = RefreshCoordinator::new(client);

    let lines = coordinator.refresh_and_wait(request).await?;
    for line in &lines {
        println!("{line}");
    }

    Ok(())
}

/// Build the request from positional args (location, day count), falling
/// back to the configured defaults
fn request_from_args(config: &DaycastConfig) -> Result<ForecastRequest> {
    let mut args = std::env::args().skip(1);

    let location = match args.next() {
        Some(arg) => LocationQuery::parse(&arg)?,
        None => LocationQuery::parse(&config.defaults.location)?,
    };

    let day_count = match args.next() {
        Some(arg) => arg
            .parse::<u8>()
            .with_context(|| format!("invalid day count '{arg}'"))?,
        None => config.defaults.day_count,
    };

    let units: Units = config.defaults.units.parse()?;

    Ok(ForecastRequest::new(location, units, day_count)?)
}
