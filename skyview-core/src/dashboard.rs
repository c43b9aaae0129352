//! The city-search / weather-fetch flow.

use tracing::info;

use crate::client::OpenWeatherClient;
use crate::display::DisplayState;
use crate::error::WeatherError;
use crate::forecast;
use crate::model::WeatherReport;
use crate::validate;

/// Orchestrates a full dashboard refresh: validate the input, resolve it to
/// coordinates, then fetch current conditions and the 5-day forecast.
///
/// A second search is simply an independent flow; only suggestion lookups
/// carry a cancellation contract (see [`crate::suggest::SuggestionSession`]).
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: OpenWeatherClient,
}

impl Dashboard {
    pub fn new(client: OpenWeatherClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &OpenWeatherClient {
        &self.client
    }

    /// Search by free-text city name.
    ///
    /// Validation failures and transport errors terminate the flow without
    /// producing a report, so whatever the caller currently displays stays
    /// untouched.
    pub async fn search_city(&self, raw: &str) -> Result<WeatherReport, WeatherError> {
        let city = validate::clean_city(raw);
        if city.is_empty() {
            return Err(WeatherError::InvalidInput("city is empty".to_string()));
        }
        if !validate::is_valid_city(&city) {
            return Err(WeatherError::InvalidInput(
                "use letters/spaces only (basic punctuation allowed)".to_string(),
            ));
        }

        let candidates = self.client.geocode(&city, 1).await?;
        let Some(place) = candidates.into_iter().next() else {
            return Err(WeatherError::NoMatches);
        };

        let label = place.label();
        info!(%city, %label, "resolved city");
        self.fetch_report(place.lat, place.lon, label).await
    }

    /// Fetch a report for known coordinates, e.g. a picked suggestion.
    pub async fn fetch_report(
        &self,
        lat: f64,
        lon: f64,
        label: String,
    ) -> Result<WeatherReport, WeatherError> {
        let (current, samples) = tokio::try_join!(
            self.client.current(lat, lon),
            self.client.forecast(lat, lon),
        )?;

        if samples.is_empty() {
            return Err(WeatherError::NoForecast);
        }

        let days = forecast::aggregate(&samples);
        let display = DisplayState::for_icon(&current.icon);

        Ok(WeatherReport {
            label,
            current,
            days,
            display,
        })
    }
}
