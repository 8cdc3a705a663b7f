//! Substring tables used to recognise condition descriptions.
//!
//! The weather service localises its `description` field, so each response
//! language needs its own table. Rules are evaluated top to bottom and the
//! first rule with any matching substring wins.

use serde::{Deserialize, Serialize};

use crate::classify::ConditionCategory;

/// Response language requested from the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en", alias = "english")]
    English,
    #[default]
    #[serde(rename = "pt_br", alias = "pt", alias = "pt-br", alias = "portuguese")]
    Portuguese,
}

impl Language {
    /// Value of the `lang` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Portuguese => "pt_br",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::English, Language::Portuguese]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    /// Accepts the same spellings as the config file, ignoring case.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "pt" | "pt_br" | "pt-br" | "portuguese" => Ok(Language::Portuguese),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: en, pt_br."
            )),
        }
    }
}

/// One category and the substrings that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub category: ConditionCategory,
    pub matches: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(category: ConditionCategory, matches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matches = matches
            .into_iter()
            .map(|m| m.as_ref().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();

        Self { category, matches }
    }

    /// `haystack` must already be lower-cased.
    fn is_match(&self, haystack: &str) -> bool {
        self.matches.iter().any(|needle| haystack.contains(needle.as_str()))
    }
}

/// Ordered rule list; first match wins.
///
/// Deserializes from a plain list of rules, e.g. in TOML:
///
/// ```toml
/// [[vocabulary]]
/// category = "clear_sky"
/// matches = ["céu limpo"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Rule>", into = "Vec<Rule>")]
pub struct Vocabulary {
    rules: Vec<Rule>,
}

impl From<Vec<Rule>> for Vocabulary {
    fn from(rules: Vec<Rule>) -> Self {
        // Re-run normalisation for rules that came straight from serde.
        let rules = rules.into_iter().map(|r| Rule::new(r.category, r.matches)).collect();
        Self { rules }
    }
}

impl From<Vocabulary> for Vec<Rule> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.rules
    }
}

impl Vocabulary {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::english(),
            Language::Portuguese => Self::portuguese(),
        }
    }

    /// Table for `lang=en` descriptions.
    ///
    /// "tornado" is owned by the Tornado rule alone; Atmosphere keeps the
    /// rest of the fog-like group and is still evaluated first.
    pub fn english() -> Self {
        use ConditionCategory::*;

        Self::from(vec![
            Rule::new(ClearSky, ["clear sky"]),
            Rule::new(FewClouds, ["few clouds", "scattered clouds", "broken clouds"]),
            Rule::new(Overcast, ["overcast clouds"]),
            Rule::new(Thunderstorm, ["thunderstorm"]),
            Rule::new(Drizzle, ["drizzle"]),
            Rule::new(Rain, ["rain"]),
            Rule::new(Snow, ["snow", "sleet"]),
            Rule::new(Atmosphere, ["mist", "smoke", "haze", "fog", "squalls"]),
            Rule::new(Sand, ["sand", "dust"]),
            Rule::new(VolcanicAsh, ["volcanic ash"]),
            Rule::new(Tornado, ["tornado"]),
        ])
    }

    /// Table for `lang=pt_br` descriptions.
    ///
    /// Drizzle ("garoa", "chuvisco") is kept apart from rain so both
    /// languages resolve to the same set of backdrops.
    pub fn portuguese() -> Self {
        use ConditionCategory::*;

        Self::from(vec![
            Rule::new(ClearSky, ["céu limpo"]),
            Rule::new(FewClouds, ["poucas nuvens", "nuvens dispersas", "algumas nuvens"]),
            Rule::new(Overcast, ["nublado"]),
            Rule::new(Thunderstorm, ["trovoada"]),
            Rule::new(Drizzle, ["garoa", "chuvisco"]),
            Rule::new(Rain, ["chuva leve", "chuva"]),
            Rule::new(Snow, ["neve", "névoa", "neve leve"]),
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Category of a free-text description. Never fails; no match and
    /// empty input both give [`ConditionCategory::Unknown`].
    pub fn category_of(&self, description: &str) -> ConditionCategory {
        let haystack = description.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.is_match(&haystack))
            .map(|rule| rule.category)
            .unwrap_or(ConditionCategory::Unknown)
    }
}
