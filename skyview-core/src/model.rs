use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::DisplayState;

/// A geocoding candidate resolved from free-text input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub name: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl GeoCandidate {
    /// Identity key for de-duplication: `name|state|country`, with missing
    /// parts treated as empty. First occurrence wins.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.name,
            self.state.as_deref().unwrap_or(""),
            self.country.as_deref().unwrap_or("")
        )
    }

    /// Human-readable label, e.g. "Manila, PH" or "Springfield, Illinois, US".
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(self.state.as_deref());
        parts.extend(self.country.as_deref());
        parts.join(", ")
    }
}

/// One raw forecast sample at 3-hour resolution, as supplied by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// "YYYY-MM-DD HH:MM:SS"
    pub timestamp: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Condition group, e.g. "Clouds" or "Clear".
    pub condition: String,
    /// OpenWeather icon code, e.g. "03d".
    pub icon: String,
}

/// One calendar day summarized from its intra-day samples.
///
/// `min <= max` holds whenever at least one temperature-bearing sample
/// contributed to the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    /// "YYYY-MM-DD"
    pub date: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Mean of the day's humidity readings, rounded; absent when no sample
    /// carried humidity.
    pub avg_humidity: Option<u8>,
    /// Condition of the sample closest to 12:00.
    pub condition: String,
    pub icon: String,
}

/// Current conditions at a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<u8>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub wind_speed: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

/// Everything the presentation layer needs after one successful search.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    /// Resolved place label, e.g. "Manila, PH".
    pub label: String,
    pub current: CurrentConditions,
    /// At most five daily summaries, ascending by date.
    pub days: Vec<DayAggregate>,
    pub display: DisplayState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, state: Option<&str>, country: Option<&str>) -> GeoCandidate {
        GeoCandidate {
            name: name.to_string(),
            state: state.map(str::to_string),
            country: country.map(str::to_string),
            lat: 0.0,
            lon: 0.0,
        }
    }

    #[test]
    fn dedup_key_treats_missing_parts_as_empty() {
        assert_eq!(candidate("Manila", None, None).dedup_key(), "Manila||");
        assert_eq!(
            candidate("Manila", None, Some("PH")).dedup_key(),
            "Manila||PH"
        );
    }

    #[test]
    fn label_skips_missing_parts() {
        assert_eq!(candidate("Manila", None, Some("PH")).label(), "Manila, PH");
        assert_eq!(
            candidate("Springfield", Some("Illinois"), Some("US")).label(),
            "Springfield, Illinois, US"
        );
        assert_eq!(candidate("Atlantis", None, None).label(), "Atlantis");
    }
}
