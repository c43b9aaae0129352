use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::config::Units;
use crate::error::WeatherError;
use crate::model::{CurrentConditions, ForecastSample, GeoCandidate};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Thin client over the three OpenWeather endpoints the dashboard uses:
/// geocoding, current conditions, and the 5-day / 3-hour forecast.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            units,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve free-text input to at most `limit` geographic candidates.
    ///
    /// Records missing a name or either coordinate are dropped, and
    /// duplicates on `name|state|country` collapse to the first occurrence.
    /// A non-array payload is treated as "no results".
    pub async fn geocode(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<GeoCandidate>, WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let limit_s = limit.to_string();

        let body = self
            .get_checked(
                &url,
                &[
                    ("q", query),
                    ("limit", limit_s.as_str()),
                    ("appid", self.api_key.as_str()),
                ],
            )
            .await?;

        let parsed: Value = serde_json::from_str(&body)?;
        let Value::Array(items) = parsed else {
            return Ok(Vec::new());
        };

        let records = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<GeoRecord>(item).ok());
        Ok(dedup_candidates(records, limit))
    }

    /// Current conditions at a coordinate.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let body = self.get_checked(&url, &self.coord_query(lat, lon)).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_conditions())
    }

    /// Raw forecast sample list at a coordinate, ~5 days at 3-hour spacing.
    ///
    /// A missing or non-array `list` yields no samples; junk entries within
    /// the list are dropped rather than failing the whole response.
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSample>, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let body = self.get_checked(&url, &self.coord_query(lat, lon)).await?;

        let mut parsed: Value = serde_json::from_str(&body)?;
        let Some(Value::Array(items)) = parsed.get_mut("list").map(Value::take) else {
            return Ok(Vec::new());
        };

        Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<OwForecastEntry>(item).ok())
            .map(OwForecastEntry::into_sample)
            .collect())
    }

    fn coord_query(&self, lat: f64, lon: f64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", self.api_key.clone()),
            ("units", self.units.as_str().to_string()),
        ]
    }

    async fn get_checked<Q>(&self, url: &str, query: &Q) -> Result<String, WeatherError>
    where
        Q: Serialize + ?Sized,
    {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, url, "OpenWeather request failed");
            return Err(WeatherError::from_status(status, &body));
        }

        Ok(body)
    }
}

fn dedup_candidates(
    records: impl Iterator<Item = GeoRecord>,
    limit: usize,
) -> Vec<GeoCandidate> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for rec in records {
        let (Some(name), Some(lat), Some(lon)) = (rec.name, rec.lat, rec.lon) else {
            continue;
        };

        let candidate = GeoCandidate {
            name,
            state: rec.state,
            country: rec.country,
            lat,
            lon,
        };
        if !seen.insert(candidate.dedup_key()) {
            continue;
        }

        out.push(candidate);
        if out.len() == limit {
            break;
        }
    }

    out
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[derive(Debug, Deserialize)]
struct GeoRecord {
    name: Option<String>,
    state: Option<String>,
    country: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct OwWeather {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize, Default)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    dt: i64,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_conditions(self) -> CurrentConditions {
        let weather = self.weather.into_iter().next().unwrap_or_default();

        CurrentConditions {
            location_name: self.name,
            condition: weather.main,
            description: weather.description,
            icon: weather.icon,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity.map(|h| h.round() as u8),
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            wind_speed: self.wind.speed,
            observed_at: unix_to_utc(self.dt).unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    #[serde(default)]
    dt_txt: String,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl OwForecastEntry {
    fn into_sample(self) -> ForecastSample {
        let weather = self.weather.into_iter().next().unwrap_or_default();

        ForecastSample {
            timestamp: self.dt_txt,
            temperature: self.main.temp,
            humidity: self.main.humidity,
            condition: weather.main,
            icon: weather.icon,
        }
    }
}
