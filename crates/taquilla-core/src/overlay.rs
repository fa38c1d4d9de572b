//! Weather and location badges.
//!
//! Both badges carry display strings that were resolved elsewhere (weather
//! service, reverse geocoding). The only logic here is classifying the
//! temperature and producing the location fallback.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Temperatures at or above this are sunny.
const SUNNY_MIN: i32 = 25;

/// Temperatures at or below this are cold.
const COLD_MAX: i32 = 10;

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Weather category shown by the badge icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherType {
    Sunny,
    Cold,
    #[default]
    Normal,
}

impl WeatherType {
    /// Classify a temperature string such as `"28°C"` or `" 8 °F"`.
    ///
    /// Unit suffixes are removed and the rest must be a whole number;
    /// anything else is [`WeatherType::Normal`].
    pub fn from_temperature(temperature: &str) -> Self {
        let numeric = temperature.replace("°C", "").replace("°F", "");
        match numeric.trim().parse::<i32>() {
            Ok(t) if t >= SUNNY_MIN => WeatherType::Sunny,
            Ok(t) if t <= COLD_MAX => WeatherType::Cold,
            _ => WeatherType::Normal,
        }
    }

    /// Asset name of the badge icon.
    pub fn icon_name(self) -> &'static str {
        match self {
            WeatherType::Sunny => "3",
            WeatherType::Cold => "2",
            WeatherType::Normal => "1",
        }
    }
}

/// Temperature badge: icon and temperature on one row, location below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherOverlay {
    pub temperature: String,
    pub location: String,
    pub weather_type: WeatherType,
}

impl WeatherOverlay {
    pub fn new(temperature: impl Into<String>, location: impl Into<String>) -> Self {
        let temperature = temperature.into();
        let weather_type = WeatherType::from_temperature(&temperature);
        Self {
            temperature,
            location: location.into(),
            weather_type,
        }
    }
}

/// Location badge: neighborhood, date and "city, country" lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOverlay {
    pub neighborhood: String,
    pub date: String,
    pub city: String,
    pub country: String,
}

impl LocationOverlay {
    pub fn new(
        neighborhood: impl Into<String>,
        date: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            neighborhood: neighborhood.into(),
            date: date.into(),
            city: city.into(),
            country: country.into(),
        }
    }

    /// Badge used when reverse geocoding fails.
    pub fn fallback(date: NaiveDate) -> Self {
        Self::new("Ubicación Actual", format_badge_date(date), "Santiago", "Chile")
    }

    /// Third line of the badge.
    pub fn city_line(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// Format a date as `"dd, <mes>, yyyy"` with the Spanish month name.
pub fn format_badge_date(date: NaiveDate) -> String {
    let month = SPANISH_MONTHS[date.month0() as usize];
    format!("{:02}, {}, {}", date.day(), month, date.year())
}
