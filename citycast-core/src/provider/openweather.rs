use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::DEFAULT_BASE_URL,
    error::FetchError,
    model::{Query, WeatherReading, round_half_up},
};

use super::WeatherProvider;

/// OpenWeather current-weather endpoint, metric units.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

/// Error body, e.g. `{"cod":"401","message":"Invalid API key..."}`.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &Query) -> Result<WeatherReading, FetchError> {
        tracing::debug!(city = %query, url = %self.base_url, "requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .inspect_err(|e| {
                tracing::warn!(city = %query, error = %e, "weather request failed")
            })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(city = %query, %status, "provider rejected request");
            return Err(FetchError::Provider {
                status: status.as_u16(),
                message: provider_message(status, &body),
            });
        }

        let reading = parse_current(&body).inspect_err(|e| {
            tracing::warn!(city = %query, error = %e, "unreadable weather payload")
        })?;

        tracing::debug!(city = %query, location = %reading.location, "weather received");
        Ok(reading)
    }
}

/// Turn a successful current-weather body into a reading.
pub fn parse_current(body: &str) -> Result<WeatherReading, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| {
            FetchError::TransportOrParse("Weather response contained no conditions".to_string())
        })?;

    Ok(WeatherReading {
        location: format!("{}, {}", parsed.name, parsed.sys.country),
        temperature_c: round_half_up(parsed.main.temp),
        description,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
    })
}

fn provider_message(status: StatusCode, body: &str) -> String {
    if status == StatusCode::NOT_FOUND {
        return "City not found".to_string();
    }

    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("Weather provider returned status {}", status.as_u16()))
}
