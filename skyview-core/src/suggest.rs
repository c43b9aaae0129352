//! Debounce-friendly suggestion lookups with supersession.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::OpenWeatherClient;
use crate::model::GeoCandidate;
use crate::validate;

/// Maximum number of candidates offered per query.
pub const MAX_SUGGESTIONS: usize = 5;

/// A cancelable query-to-candidates session over the geocoding lookup.
///
/// Each [`submit`](Self::submit) supersedes any earlier call still in
/// flight: the older lookup is aborted and resolves to `None`, so a stale
/// result can never arrive after a newer one. The session holds a single
/// slot with the cancellation handle of the in-flight lookup; a new submit
/// cancels whatever occupies the slot and installs its own handle.
///
/// Debouncing is the caller's job (~180 ms of input quiescence works well);
/// the session only guarantees the supersession contract.
#[derive(Debug)]
pub struct SuggestionSession {
    client: OpenWeatherClient,
    current: Mutex<Option<CancellationToken>>,
}

impl SuggestionSession {
    pub fn new(client: OpenWeatherClient) -> Self {
        Self {
            client,
            current: Mutex::new(None),
        }
    }

    /// Look up candidates for `raw`.
    ///
    /// Returns `None` when a newer `submit` superseded this one, and
    /// `Some(candidates)` otherwise. Too-short or pattern-rejected input
    /// yields `Some(vec![])` without issuing a request, and failed lookups
    /// degrade to `Some(vec![])` as well; suggestions are best-effort and
    /// never surface an error.
    pub async fn submit(&self, raw: &str) -> Option<Vec<GeoCandidate>> {
        let query = validate::clean_city(raw);
        if !validate::is_valid_query(&query) {
            return Some(Vec::new());
        }

        let token = self.install_token();

        tokio::select! {
            // checked first: a superseded lookup must not deliver even if
            // its response raced in
            biased;
            () = token.cancelled() => None,
            result = self.client.geocode(&query, MAX_SUGGESTIONS) => match result {
                Ok(candidates) => Some(candidates),
                Err(err) => {
                    debug!(%query, "suggestion lookup failed: {err}");
                    Some(Vec::new())
                }
            },
        }
    }

    /// Cancel whatever handle occupies the slot and install a fresh one.
    fn install_token(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(prev) = self.current.lock().replace(token.clone()) {
            prev.cancel();
        }
        token
    }
}
