use reqwest::StatusCode;

/// Errors produced by the city-search / weather-fetch flow.
///
/// Suggestion lookups never surface these; they degrade to an empty
/// candidate list instead (see [`crate::suggest::SuggestionSession`]).
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Input was empty or failed the city-name pattern. No request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from OpenWeather.
    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse OpenWeather response: {0}")]
    Payload(#[from] serde_json::Error),

    /// Geocoding succeeded but returned zero usable records.
    #[error("No results found for that city.")]
    NoMatches,

    /// Forecast lookup succeeded but carried an empty sample list.
    #[error("No forecast results found.")]
    NoForecast,

    #[error("API key missing. Run `skyview configure` and enter your OpenWeather API key.")]
    MissingApiKey,
}

impl WeatherError {
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            body: truncate_body(body),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
