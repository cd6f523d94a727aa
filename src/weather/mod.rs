
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::WeatherConfig;
use crate::corpus::capitalize;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Geographic point for a forecast lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parsed forecast snapshot with the fields the planner renders.
///
/// Parsing is strict: a response missing `weather[0].description` or
/// `main.temp` is a fetch failure, never a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub description: String,
    pub temperature: f32,
    pub temperature_unit: &'static str,
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}{}",
            capitalize(&self.description),
            self.temperature,
            self.temperature_unit
        )
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
    #[serde(default)]
    city: Option<CityInfo>,
}

#[derive(Debug, Deserialize)]
struct CityInfo {
    /// Seconds east of UTC at the forecast location
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    weather: Vec<WeatherCondition>,
    main: MainMetrics,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainMetrics {
    temp: f32,
}

/// OpenWeather 5-day forecast client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    api_key: String,
    units: String,
    agent: ureq::Agent,
}

impl WeatherClient {
    #[inline]
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_BASE_URL).context("Failed to parse weather base URL")?;

        // A bounded timeout keeps a slow weather API from stalling the
        // interactive session; ranking never waits on this client.
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            units: config.units.clone(),
            agent,
        })
    }

    #[inline]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetch a forecast and render it as a display string. Every failure
    /// mode degrades to a descriptive message; this method cannot fail.
    #[inline]
    pub fn forecast(&self, date: NaiveDate, coords: Coordinates) -> String {
        match self.fetch_forecast(date, coords) {
            Ok(forecast) => forecast.to_string(),
            Err(e) => {
                warn!("Weather lookup failed: {:#}", e);
                format!("Error retrieving weather data: {e:#}")
            }
        }
    }

    /// Fetch and parse the forecast nearest the requested travel date
    #[inline]
    pub fn fetch_forecast(&self, date: NaiveDate, coords: Coordinates) -> Result<Forecast> {
        debug!(
            "Fetching forecast for {} at ({}, {})",
            date, coords.latitude, coords.longitude
        );

        let mut url = self
            .base_url
            .join("/data/2.5/forecast")
            .context("Failed to build forecast URL")?;
        url.query_pairs_mut()
            .append_pair("lat", &coords.latitude.to_string())
            .append_pair("lon", &coords.longitude.to_string())
            .append_pair("appid", &self.api_key)
            .append_pair("units", &self.units);

        let response_text = self
            .agent
            .get(url.as_str())
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .context("Weather request failed")?;

        let response: ForecastResponse = serde_json::from_str(&response_text)
            .context("Failed to parse weather response")?;

        let utc_offset = response.city.as_ref().map_or(0, |city| city.timezone);
        let entry = select_entry(&response.list, date, utc_offset)
            .context("Weather data not available for the requested period")?;

        let condition = entry
            .weather
            .first()
            .context("Weather response contained no conditions")?;

        Ok(Forecast {
            description: condition.description.clone(),
            temperature: entry.main.temp,
            temperature_unit: temperature_unit(&self.units),
        })
    }
}

/// Prefer the first entry falling on the travel date in the forecast
/// location's local time; the feed only covers five days, so dates beyond
/// it fall back to the earliest entry.
///
/// Entry timestamps are UTC. `utc_offset_seconds` is the feed's
/// `city.timezone` shift, applied so entries near midnight land on the
/// traveler's calendar day rather than the UTC one.
fn select_entry(
    entries: &[ForecastEntry],
    date: NaiveDate,
    utc_offset_seconds: i32,
) -> Option<&ForecastEntry> {
    entries
        .iter()
        .find(|entry| {
            DateTime::from_timestamp(entry.dt + i64::from(utc_offset_seconds), 0)
                .is_some_and(|stamp| stamp.date_naive() == date)
        })
        .or_else(|| entries.first())
}

fn temperature_unit(units: &str) -> &'static str {
    match units {
        "metric" => "°C",
        "imperial" => "°F",
        _ => "K",
    }
}
