//! One query from city text to display-ready strings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    classify::{ConditionCategory, ResourceId},
    daypart::{DayPart, resolve_day_part},
    error::{ErrorKind, QueryError},
    model::{WeatherRequest, WeatherSnapshot},
    provider::WeatherProvider,
    vocabulary::{Language, Vocabulary},
};

/// Everything the front end shows for one query. Built once, never patched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub local_time: String,
    pub description: String,
    pub day_part: Option<DayPart>,
    pub category: Option<ConditionCategory>,
    /// `None` when the query failed and nothing was classified.
    pub background: Option<ResourceId>,
}

impl WeatherReport {
    pub fn from_snapshot(
        snapshot: &WeatherSnapshot,
        vocabulary: &Vocabulary,
        now_utc: DateTime<Utc>,
    ) -> Self {
        let clock = resolve_day_part(snapshot.utc_offset_seconds, now_utc);
        let description = snapshot.primary_description();
        let category = vocabulary.category_of(description);

        debug!(
            city = %snapshot.city,
            %description,
            %category,
            part = %clock.part,
            "classified conditions"
        );

        Self {
            city: snapshot.city.clone(),
            temperature: format!("{} °C", snapshot.temperature_c),
            feels_like: format!("{} °C", snapshot.feels_like_c),
            humidity: format!("{} %", snapshot.humidity_pct),
            wind: format!("{} m/s", snapshot.wind_speed_mps),
            local_time: clock.hhmm(),
            description: description.to_string(),
            day_part: Some(clock.part),
            category: Some(category),
            background: Some(category.resource(clock.part)),
        }
    }

    /// Fixed placeholder text for a failed query.
    pub fn placeholder(err: &QueryError, language: Language) -> Self {
        let text = Placeholders::for_kind(err.kind(), language);

        Self {
            city: text.city.to_string(),
            temperature: text.temperature.to_string(),
            feels_like: text.feels_like.to_string(),
            humidity: text.humidity.to_string(),
            wind: text.wind.to_string(),
            local_time: text.local_time.to_string(),
            description: text.description.to_string(),
            day_part: None,
            category: None,
            background: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.background.is_none()
    }
}

struct Placeholders {
    city: &'static str,
    temperature: &'static str,
    feels_like: &'static str,
    humidity: &'static str,
    wind: &'static str,
    local_time: &'static str,
    description: &'static str,
}

impl Placeholders {
    fn for_kind(kind: ErrorKind, language: Language) -> Self {
        match (kind, language) {
            (ErrorKind::Validation, Language::Portuguese) => {
                Self::headline("Por favor, insira o nome de uma cidade.")
            }
            (ErrorKind::Validation, Language::English) => Self::headline("Please enter a city name."),
            (ErrorKind::NotFound, Language::Portuguese) => Self {
                city: "Cidade não encontrada!",
                temperature: "Temperatura não encontrada!",
                feels_like: "Sensação térmica não encontrada!",
                humidity: "Umidade não encontrada!",
                wind: "Informações sobre vento não encontradas!",
                local_time: "Horário local não encontrado!",
                description: "Detalhes não encontrados!",
            },
            (ErrorKind::NotFound, Language::English) => Self {
                city: "City not found!",
                temperature: "Temperature not found!",
                feels_like: "Feels-like temperature not found!",
                humidity: "Humidity not found!",
                wind: "Wind information not found!",
                local_time: "Local time not found!",
                description: "Details not found!",
            },
            (ErrorKind::Incomplete, Language::Portuguese) => Self::headline("Dados incompletos!"),
            (ErrorKind::Incomplete, Language::English) => Self::headline("Incomplete data!"),
            (ErrorKind::Unexpected, Language::Portuguese) => Self::headline("Erro inesperado!"),
            (ErrorKind::Unexpected, Language::English) => Self::headline("Unexpected error!"),
        }
    }

    /// One message in the city slot, every other field blank.
    fn headline(city: &'static str) -> Self {
        Self {
            city,
            temperature: "",
            feels_like: "",
            humidity: "",
            wind: "",
            local_time: "",
            description: "",
        }
    }
}

/// Validate `request`, fetch a snapshot and build the report.
pub async fn query(
    provider: &dyn WeatherProvider,
    request: &WeatherRequest,
    vocabulary: &Vocabulary,
    now_utc: DateTime<Utc>,
) -> Result<WeatherReport, QueryError> {
    if request.city.trim().is_empty() {
        return Err(QueryError::EmptyCity);
    }

    let snapshot = provider.get_weather(request).await?;

    Ok(WeatherReport::from_snapshot(&snapshot, vocabulary, now_utc))
}

/// Like [`query`], but failures become placeholder reports. Details of
/// unexpected failures only go to the log.
pub async fn query_or_placeholder(
    provider: &dyn WeatherProvider,
    request: &WeatherRequest,
    vocabulary: &Vocabulary,
    now_utc: DateTime<Utc>,
) -> WeatherReport {
    match query(provider, request, vocabulary, now_utc).await {
        Ok(report) => report,
        Err(err) => {
            match err.kind() {
                ErrorKind::Unexpected => {
                    error!(city = %request.city, error = ?err, "weather query failed")
                }
                _ => warn!(city = %request.city, error = %err, "weather query failed"),
            }
            WeatherReport::placeholder(&err, request.language)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FakeProvider {
        result: fn() -> Result<WeatherSnapshot, QueryError>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(result: fn() -> Result<WeatherSnapshot, QueryError>) -> Self {
            Self { result, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn get_weather(&self, _: &WeatherRequest) -> Result<WeatherSnapshot, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn light_rain() -> Result<WeatherSnapshot, QueryError> {
        Ok(WeatherSnapshot {
            city: "Lisboa".into(),
            utc_offset_seconds: 0,
            temperature_c: 17.5,
            feels_like_c: 16.9,
            humidity_pct: 82.0,
            wind_speed_mps: 4.0,
            condition_descriptions: vec!["chuva leve".into()],
        })
    }

    fn no_descriptions() -> Result<WeatherSnapshot, QueryError> {
        light_rain().map(|s| WeatherSnapshot { condition_descriptions: vec![], ..s })
    }

    fn not_found() -> Result<WeatherSnapshot, QueryError> {
        Err(QueryError::NotFound { status: 404 })
    }

    fn pt_request(city: &str) -> WeatherRequest {
        WeatherRequest::new(city, Language::Portuguese)
    }

    #[tokio::test]
    async fn light_rain_at_noon_is_rain_day() {
        let provider = FakeProvider::new(light_rain);
        let report = query(&provider, &pt_request("Lisboa"), &Vocabulary::portuguese(), noon_utc())
            .await
            .expect("query succeeds");

        assert_eq!(report.day_part, Some(DayPart::Day));
        assert_eq!(report.category, Some(ConditionCategory::Rain));
        assert_eq!(report.background.map(|r| r.as_str()), Some("rain_day.jpg"));

        assert_eq!(report.city, "Lisboa");
        assert_eq!(report.temperature, "17.5 °C");
        assert_eq!(report.feels_like, "16.9 °C");
        assert_eq!(report.humidity, "82 %");
        assert_eq!(report.wind, "4 m/s");
        assert_eq!(report.local_time, "12:00");
        assert_eq!(report.description, "chuva leve");
    }

    #[tokio::test]
    async fn empty_descriptions_fall_back_to_default() {
        let provider = FakeProvider::new(no_descriptions);
        let report = query(&provider, &pt_request("Lisboa"), &Vocabulary::portuguese(), noon_utc())
            .await
            .expect("empty list is not an error");

        assert_eq!(report.category, Some(ConditionCategory::Unknown));
        assert_eq!(report.background, Some(ResourceId::DEFAULT));
        assert_eq!(report.description, "");
    }

    #[tokio::test]
    async fn not_found_yields_placeholders_without_classification() {
        let provider = FakeProvider::new(not_found);
        let report = query_or_placeholder(
            &provider,
            &pt_request("Atlantis"),
            &Vocabulary::portuguese(),
            noon_utc(),
        )
        .await;

        assert!(report.is_placeholder());
        assert_eq!(report.category, None);
        assert_eq!(report.day_part, None);
        assert_eq!(report.city, "Cidade não encontrada!");
        assert_eq!(report.temperature, "Temperatura não encontrada!");
        assert_eq!(report.description, "Detalhes não encontrados!");
        assert_eq!(report.wind, "Informações sobre vento não encontradas!");
        assert_eq!(report.feels_like, "Sensação térmica não encontrada!");
        assert_eq!(report.humidity, "Umidade não encontrada!");
        assert_eq!(report.local_time, "Horário local não encontrado!");
    }

    #[test]
    fn not_found_fills_every_display_field() {
        let report =
            WeatherReport::placeholder(&QueryError::NotFound { status: 404 }, Language::English);

        for field in [
            &report.city,
            &report.temperature,
            &report.feels_like,
            &report.humidity,
            &report.wind,
            &report.local_time,
            &report.description,
        ] {
            assert!(field.ends_with("not found!"), "{field}");
        }
    }

    #[tokio::test]
    async fn blank_city_never_reaches_provider() {
        let provider = FakeProvider::new(light_rain);

        let err = query(&provider, &pt_request("  "), &Vocabulary::portuguese(), noon_utc())
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::EmptyCity));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn placeholders_per_kind() {
        let incomplete = WeatherReport::placeholder(
            &QueryError::Incomplete { section: "main" },
            Language::Portuguese,
        );
        assert_eq!(incomplete.city, "Dados incompletos!");
        assert_eq!(incomplete.temperature, "");

        let unexpected = WeatherReport::placeholder(
            &QueryError::Malformed(serde_json::from_str::<u8>("x").unwrap_err()),
            Language::English,
        );
        assert_eq!(unexpected.city, "Unexpected error!");
        assert_eq!(unexpected.wind, "");
    }

    #[test]
    fn night_offset_picks_night_backdrop() {
        let snapshot = WeatherSnapshot {
            city: "Tokyo".into(),
            utc_offset_seconds: 9 * 3600,
            temperature_c: 9.0,
            feels_like_c: 7.0,
            humidity_pct: 40.0,
            wind_speed_mps: 2.5,
            condition_descriptions: vec!["clear sky".into()],
        };

        let report = WeatherReport::from_snapshot(&snapshot, &Vocabulary::english(), noon_utc());

        assert_eq!(report.local_time, "21:00");
        assert_eq!(report.day_part, Some(DayPart::Night));
        assert_eq!(report.background.map(|r| r.as_str()), Some("clear_sky_night.jpg"));
    }
}
