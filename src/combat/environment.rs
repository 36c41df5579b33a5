//! Light and weather conditions
//!
//! Both are graded 0-5 and subtract directly from hit and avoid rolls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Light {
    #[default]
    Daylight,
    DawnOrDusk,
    FullMoon,
    SingleCandle,
    ShroudedMoon,
    PitchBlack,
}

impl Light {
    pub fn severity(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    LightWindOrRain,
    HeavyWindOrRain,
    GaleOrSnowfall,
    Snowstorm,
    HurricaneOrBlizzard,
}

impl Weather {
    pub fn severity(self) -> i32 {
        self as i32
    }
}

/// Conditions on the battlefield, set independently of combat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub light: Light,
    #[serde(default)]
    pub weather: Weather,
}

impl Environment {
    pub fn new(light: Light, weather: Weather) -> Self {
        Self { light, weather }
    }

    /// Combined penalty of light and weather
    pub fn penalty(&self) -> i32 {
        self.light.severity() + self.weather.severity()
    }
}
