use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::QueryError,
    model::{WeatherRequest, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Only metric units are requested; display strings assume °C and m/s.
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { api_key, base_url, http: Client::new() }
    }

    async fn fetch_current(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, QueryError> {
        let url = format!("{}/weather", self.base_url);

        debug!(city = %request.city, lang = %request.language, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", request.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("lang", request.language.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(
                city = %request.city,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "current weather request failed"
            );
            return Err(QueryError::NotFound { status: status.as_u16() });
        }

        debug!(bytes = body.len(), "received current weather");

        parse_current(&body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherSnapshot, QueryError> {
        self.fetch_current(request).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    timezone: i64,
    main: Option<OwMain>,
    weather: Option<Vec<OwWeather>>,
    wind: Option<OwWind>,
}

impl TryFrom<OwCurrentResponse> for WeatherSnapshot {
    type Error = QueryError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let main = parsed.main.ok_or(QueryError::Incomplete { section: "main" })?;
        let weather = parsed.weather.ok_or(QueryError::Incomplete { section: "weather" })?;
        let wind = parsed.wind.ok_or(QueryError::Incomplete { section: "wind" })?;

        let condition_descriptions = weather
            .into_iter()
            .map(|w| w.description.unwrap_or_default())
            .collect();

        Ok(WeatherSnapshot {
            city: parsed.name.unwrap_or_default(),
            utc_offset_seconds: parsed.timezone,
            temperature_c: main.temp,
            feels_like_c: main.feels_like,
            humidity_pct: main.humidity,
            wind_speed_mps: wind.speed,
            condition_descriptions,
        })
    }
}

/// Decode a current-weather body into a snapshot.
pub(crate) fn parse_current(body: &str) -> Result<WeatherSnapshot, QueryError> {
    if body.trim().is_empty() {
        return Err(QueryError::EmptyResults);
    }

    let parsed: Option<OwCurrentResponse> = serde_json::from_str(body)?;
    let parsed = parsed.ok_or(QueryError::EmptyResults)?;

    WeatherSnapshot::try_from(parsed)
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
