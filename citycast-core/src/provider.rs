use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    FetchError, Query, Settings, WeatherReading, provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// A source of current conditions. One call is one outbound request.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &Query) -> Result<WeatherReading, FetchError>;
}

/// Construct the provider from resolved settings.
pub fn provider_from_settings(settings: &Settings) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::with_base_url(
        settings.api_key.clone(),
        settings.base_url.clone(),
    ))
}
