use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    provider::openweather::DEFAULT_BASE_URL,
    vocabulary::{Language, Vocabulary},
};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
///
/// ```toml
/// api_key = "..."
/// language = "pt_br"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Language requested from the service; also selects the built-in
    /// vocabulary.
    #[serde(default)]
    pub language: Language,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Replaces the built-in vocabulary for `language` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vocabulary>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: Language::default(),
            base_url: default_base_url(),
            vocabulary: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherview", "weatherview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Returns the API key, if one is stored and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Vocabulary for the configured `language`.
    pub fn active_vocabulary(&self) -> Vocabulary {
        self.vocabulary_for(self.language)
    }

    /// The custom vocabulary is written for the configured language only;
    /// any other language gets its built-in table.
    pub fn vocabulary_for(&self, language: Language) -> Vocabulary {
        match &self.vocabulary {
            Some(custom) if language == self.language => custom.clone(),
            _ => Vocabulary::for_language(language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ConditionCategory;

    #[test]
    fn default_is_unconfigured_portuguese() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.language, Language::Portuguese);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.active_vocabulary(), Vocabulary::portuguese());
    }

    #[test]
    fn set_api_key_trims() {
        let mut cfg = Config::default();
        cfg.set_api_key("  OPEN_KEY \n".into());

        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
    }

    #[test]
    fn language_selects_builtin_vocabulary() {
        let cfg = Config { language: Language::English, ..Config::default() };
        assert_eq!(cfg.active_vocabulary(), Vocabulary::english());
    }

    #[test]
    fn parses_minimal_toml() {
        let cfg = Config::from_toml(r#"api_key = "abc""#).expect("valid config");

        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.language, Language::Portuguese);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.vocabulary.is_none());
    }

    #[test]
    fn custom_vocabulary_overrides_builtin() {
        let cfg = Config::from_toml(
            r#"
            api_key = "abc"
            language = "en"

            [[vocabulary]]
            category = "sand"
            matches = ["desert wind"]
            "#,
        )
        .expect("valid config");

        let vocab = cfg.active_vocabulary();
        assert_eq!(vocab.category_of("desert wind"), ConditionCategory::Sand);
        assert_eq!(vocab.category_of("clear sky"), ConditionCategory::Unknown);

        let other = cfg.vocabulary_for(Language::Portuguese);
        assert_eq!(other, Vocabulary::portuguese());
    }

    #[test]
    fn toml_roundtrip_keeps_settings() {
        let mut cfg = Config { language: Language::English, ..Config::default() };
        cfg.set_api_key("KEY".into());

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back = Config::from_toml(&text).expect("parse");

        assert_eq!(back.api_key(), Some("KEY"));
        assert_eq!(back.language, Language::English);
        assert_eq!(back.base_url, cfg.base_url);
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Config::from_toml(r#"language = "fr""#).is_err());
    }
}
