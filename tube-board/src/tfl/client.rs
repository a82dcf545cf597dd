//! TfL Unified API HTTP client.
//!
//! Provides async methods for the live arrival feeds and line timetables.
//! Handles the optional app key, limits concurrent requests, and converts
//! responses to domain types.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Mode, PredictedArrival};
use crate::timetable::{Direction, TimetableResponse};

use super::convert::{convert_arrival_departure, convert_stop_arrival};
use super::error::TflError;
use super::types::{ArrivalDeparture, StopArrival};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// App key; anonymous access is allowed at a lower rate limit
    pub app_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a config for anonymous access.
    pub fn new() -> Self {
        Self {
            app_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set the app key sent with every request.
    pub fn with_app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// TfL Unified API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
    semaphore: Arc<Semaphore>,
}

impl TflClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_key: config.app_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Live predictions for one stop, routed to the right feed for `mode`.
    ///
    /// Underground, DLR and bus stops use the seconds-countdown feed.
    /// Overground and Elizabeth line stations use the mm:ss departures feed.
    /// Other modes have no feed and return nothing.
    pub async fn live_predictions(
        &self,
        naptan: &str,
        mode: Mode,
    ) -> Result<Vec<PredictedArrival>, TflError> {
        match mode {
            Mode::Tube | Mode::Dlr | Mode::Bus => self.stop_arrivals(naptan).await,
            Mode::Elizabeth | Mode::Overground => self.arrival_departures(naptan, mode).await,
            Mode::AllMetro | Mode::Unknown => {
                debug!(stop = naptan, mode = %mode, "No live feed for mode");
                Ok(Vec::new())
            }
        }
    }

    /// Seconds-countdown predictions for a stop.
    pub async fn stop_arrivals(&self, naptan: &str) -> Result<Vec<PredictedArrival>, TflError> {
        let url = format!("{}/StopPoint/{}/Arrivals", self.base_url, naptan);
        let records: Vec<StopArrival> = self.get_json(&url, &[]).await?.unwrap_or_default();

        Ok(records
            .into_iter()
            .map(|r| convert_stop_arrival(r, naptan))
            .collect())
    }

    /// mm:ss departures for a stop on the line that serves `mode`.
    pub async fn arrival_departures(
        &self,
        naptan: &str,
        mode: Mode,
    ) -> Result<Vec<PredictedArrival>, TflError> {
        let Some(line_id) = mode.departures_line_id() else {
            return Ok(Vec::new());
        };

        let url = format!("{}/StopPoint/{}/ArrivalDepartures", self.base_url, naptan);
        let records: Vec<ArrivalDeparture> = self
            .get_json(&url, &[("lineIds", line_id.to_string())])
            .await?
            .unwrap_or_default();

        Ok(records
            .into_iter()
            .map(|r| convert_arrival_departure(r, naptan, mode, line_id))
            .collect())
    }

    /// Timetable for a line from a stop in one direction.
    ///
    /// Returns `None` when upstream has no timetable for the combination.
    pub async fn timetable(
        &self,
        line_id: &str,
        naptan: &str,
        direction: Direction,
    ) -> Result<Option<TimetableResponse>, TflError> {
        let url = format!("{}/Line/{}/Timetable/{}", self.base_url, line_id, naptan);
        self.get_json(&url, &[("direction", direction.as_str().to_string())])
            .await
    }

    /// GET and decode a JSON body. 404 and an empty or `null` body are `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, TflError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TflError::Closed)?;

        let mut request = self.http.get(url).query(query);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TflError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TflError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_body(&body)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, TflError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| TflError::Decode {
            message: e.to_string(),
            excerpt: Some(body.chars().take(500).collect()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TflConfig::new()
            .with_app_key("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.app_key.as_deref(), Some("test-key"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TflConfig::default();

        assert_eq!(config.app_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation_trims_base_url() {
        let client = TflClient::new(TflConfig::new().with_base_url("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn parse_body_null_and_empty() {
        assert!(parse_body::<Vec<StopArrival>>("").unwrap().is_none());
        assert!(parse_body::<Vec<StopArrival>>(" null ").unwrap().is_none());
        assert_eq!(parse_body::<Vec<StopArrival>>("[]").unwrap().map(|v| v.len()), Some(0));
    }

    #[test]
    fn parse_body_error_keeps_excerpt() {
        let err = parse_body::<Vec<StopArrival>>("{\"message\": \"oops\"}").unwrap_err();
        match err {
            TflError::Decode { excerpt, .. } => assert!(excerpt.unwrap().contains("oops")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn modes_without_feed_make_no_request() {
        // Unroutable base URL: any request would fail
        let client = TflClient::new(TflConfig::new().with_base_url("http://127.0.0.1:9")).unwrap();
        assert!(client.live_predictions("HUBZWL", Mode::AllMetro).await.unwrap().is_empty());
        assert!(client.live_predictions("x", Mode::Unknown).await.unwrap().is_empty());
        assert!(client.arrival_departures("x", Mode::Tube).await.unwrap().is_empty());
    }

    // Requests against the live API need network access and are not run here.
}
