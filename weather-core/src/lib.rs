//! Core library for the `weatherview` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather current-weather client
//! - Day/night resolution from a city's UTC offset
//! - Classification of condition descriptions into background images
//!
//! It is used by `weatherview-cli`, but can also back other front ends.

pub mod classify;
pub mod config;
pub mod daypart;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod vocabulary;

pub use classify::{ConditionCategory, ResourceId, classify};
pub use config::Config;
pub use daypart::{DayPart, LocalClock, resolve_day_part};
pub use error::{ErrorKind, QueryError};
pub use model::{WeatherRequest, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use report::{WeatherReport, query, query_or_placeholder};
pub use vocabulary::{Language, Rule, Vocabulary};
