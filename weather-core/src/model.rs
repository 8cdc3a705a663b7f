use crate::vocabulary::Language;

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
    pub language: Language,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>, language: Language) -> Self {
        Self { city: city.into(), language }
    }
}

/// Current conditions for one city, as reported by the weather service.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub utc_offset_seconds: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    /// In service order; only the first entry drives the backdrop.
    pub condition_descriptions: Vec<String>,
}

impl WeatherSnapshot {
    /// First condition description, or `""` when the service sent none.
    pub fn primary_description(&self) -> &str {
        self.condition_descriptions.first().map(String::as_str).unwrap_or("")
    }
}
