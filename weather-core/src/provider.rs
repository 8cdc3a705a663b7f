use crate::{
    Config, WeatherRequest, WeatherSnapshot, error::QueryError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, QueryError>;
}

/// Construct the OpenWeather provider from the stored API key and base URL.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `weatherview configure` and enter your OpenWeather API key."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url.clone())))
}
