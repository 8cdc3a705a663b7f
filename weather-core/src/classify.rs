//! Mapping from a condition description to a background image.

use serde::{Deserialize, Serialize};

use crate::{daypart::DayPart, vocabulary::Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    ClearSky,
    FewClouds,
    Overcast,
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Sand,
    VolcanicAsh,
    Tornado,
    Unknown,
}

impl ConditionCategory {
    pub const fn all() -> &'static [ConditionCategory] {
        use ConditionCategory::*;
        &[
            ClearSky,
            FewClouds,
            Overcast,
            Thunderstorm,
            Drizzle,
            Rain,
            Snow,
            Atmosphere,
            Sand,
            VolcanicAsh,
            Tornado,
            Unknown,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::ClearSky => "clear_sky",
            ConditionCategory::FewClouds => "few_clouds",
            ConditionCategory::Overcast => "overcast",
            ConditionCategory::Thunderstorm => "thunderstorm",
            ConditionCategory::Drizzle => "drizzle",
            ConditionCategory::Rain => "rain",
            ConditionCategory::Snow => "snow",
            ConditionCategory::Atmosphere => "atmosphere",
            ConditionCategory::Sand => "sand",
            ConditionCategory::VolcanicAsh => "volcanic_ash",
            ConditionCategory::Tornado => "tornado",
            ConditionCategory::Unknown => "unknown",
        }
    }

    /// Background image for this category at the given time of day.
    /// `Unknown` ignores `part`.
    pub fn resource(&self, part: DayPart) -> ResourceId {
        use ConditionCategory::*;
        use DayPart::*;

        let file = match (self, part) {
            (ClearSky, Day) => "clear_sky_day.jpg",
            (ClearSky, Night) => "clear_sky_night.jpg",
            (FewClouds, Day) => "few_clouds_day.jpg",
            (FewClouds, Night) => "few_clouds_night.jpg",
            (Overcast, Day) => "overcast_day.jpg",
            (Overcast, Night) => "overcast_night.jpg",
            (Thunderstorm, Day) => "thunderstorm_day.jpg",
            (Thunderstorm, Night) => "thunderstorm_night.jpg",
            (Drizzle, Day) => "drizzle_day.jpg",
            (Drizzle, Night) => "drizzle_night.jpg",
            (Rain, Day) => "rain_day.jpg",
            (Rain, Night) => "rain_night.jpg",
            (Snow, Day) => "snow_day.jpg",
            (Snow, Night) => "snow_night.jpg",
            (Atmosphere, Day) => "fog_day.jpg",
            (Atmosphere, Night) => "fog_night.jpg",
            (Sand, Day) => "sand_day.jpg",
            (Sand, Night) => "sand_night.jpg",
            (VolcanicAsh, Day) => "volcanic_ash_day.jpg",
            (VolcanicAsh, Night) => "volcanic_ash_night.jpg",
            (Tornado, Day) => "tornado_day.jpg",
            (Tornado, Night) => "tornado_night.jpg",
            (Unknown, _) => return ResourceId::DEFAULT,
        };

        ResourceId(file)
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name of a background image asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(&'static str);

impl ResourceId {
    pub const DEFAULT: ResourceId = ResourceId("default.jpg");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Pick the background for `description` seen at `part`.
pub fn classify(vocabulary: &Vocabulary, description: &str, part: DayPart) -> ResourceId {
    vocabulary.category_of(description).resource(part)
}
