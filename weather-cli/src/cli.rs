use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::debug;
use weatherview_core::{
    Config, DayPart, Language, QueryError, WeatherReport, WeatherRequest, classify,
    provider_from_config, query_or_placeholder,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherview", version, about = "Current weather with a matching backdrop")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and response language.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; prompted for when absent or blank.
        city: Option<String>,

        /// Response language, "en" or "pt_br"; defaults to the configured one.
        #[arg(long)]
        lang: Option<String>,

        /// RFC 3339 instant used as "now" for the local clock.
        #[arg(long)]
        at: Option<String>,
    },

    /// Classify a description offline and print the chosen backdrop.
    Classify {
        description: String,

        /// Use the night variant.
        #[arg(long)]
        night: bool,

        /// Vocabulary language, "en" or "pt_br"; defaults to the configured one.
        #[arg(long)]
        lang: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lang, at } => show(city, lang, at).await,
            Command::Classify { description, night, lang } => {
                let config = Config::load()?;
                let language = resolve_language(&config, lang.as_deref())?;
                let vocabulary = config.vocabulary_for(language);
                let part = if night { DayPart::Night } else { DayPart::Day };

                let category = vocabulary.category_of(&description);
                let resource = classify(&vocabulary, &description, part);
                println!("{category}\t{resource}");
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let languages = Language::all().to_vec();
    let cursor = languages.iter().position(|l| *l == config.language).unwrap_or(0);
    let language = Select::new("Response language:", languages)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read language")?;

    config.set_api_key(api_key);
    config.language = language;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: Option<String>,
    lang: Option<String>,
    at: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let language = resolve_language(&config, lang.as_deref())?;
    let now = match at {
        Some(s) => {
            let at = parse_instant(&s)?;
            debug!(%at, "using --at instead of the current time");
            at
        }
        None => Utc::now(),
    };

    let city = match city.filter(|c| !c.trim().is_empty()) {
        Some(c) => c,
        None => prompt_city(language)?,
    };

    let provider = provider_from_config(&config)?;
    let vocabulary = config.vocabulary_for(language);
    let request = WeatherRequest::new(city, language);

    let report = query_or_placeholder(provider.as_ref(), &request, &vocabulary, now).await;
    print!("{}", render::report(&report));

    Ok(())
}

/// Keep asking until something other than whitespace is entered.
fn prompt_city(language: Language) -> anyhow::Result<String> {
    loop {
        let city = Text::new("City:").prompt().context("Failed to read city")?;
        if !city.trim().is_empty() {
            return Ok(city);
        }
        let hint = WeatherReport::placeholder(&QueryError::EmptyCity, language);
        eprintln!("{}", hint.city);
    }
}

fn resolve_language(config: &Config, lang: Option<&str>) -> anyhow::Result<Language> {
    match lang {
        Some(l) => Language::try_from(l),
        None => Ok(config.language),
    }
}

fn parse_instant(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid --at value '{s}', expected RFC 3339"))?;
    Ok(dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_options() {
        let cli = Cli::parse_from([
            "weatherview",
            "show",
            "Porto Alegre",
            "--lang",
            "en",
            "--at",
            "2024-03-10T12:00:00Z",
        ]);

        match cli.command {
            Command::Show { city, lang, at } => {
                assert_eq!(city.as_deref(), Some("Porto Alegre"));
                assert_eq!(lang.as_deref(), Some("en"));
                assert_eq!(at.as_deref(), Some("2024-03-10T12:00:00Z"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["weatherview", "classify", "céu limpo", "--night", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Classify { night: true, .. }));
    }

    #[test]
    fn lang_flag_overrides_config() {
        let config = Config::default();
        assert_eq!(resolve_language(&config, None).unwrap(), Language::Portuguese);
        assert_eq!(resolve_language(&config, Some("en")).unwrap(), Language::English);
        assert!(resolve_language(&config, Some("de")).is_err());
    }

    #[test]
    fn at_accepts_offsets() {
        let dt = parse_instant("2024-03-10T09:00:00-03:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-10T12:00:00+00:00");
        assert!(parse_instant("yesterday").is_err());
    }
}
