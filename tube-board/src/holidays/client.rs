//! gov.uk bank holidays client.

use std::collections::HashMap;

use super::HolidayDivision;
use super::error::HolidayError;

/// Published bank holiday feed.
const DEFAULT_URL: &str = "https://www.gov.uk/bank-holidays.json";

/// The division whose holidays apply to London.
pub const ENGLAND_AND_WALES: &str = "england-and-wales";

/// Configuration for the holiday client.
#[derive(Debug, Clone)]
pub struct HolidayClientConfig {
    pub url: String,
    /// Division key to extract from the feed
    pub division: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HolidayClientConfig {
    pub fn new() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            division: ENGLAND_AND_WALES.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom URL (for testing).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = division.into();
        self
    }
}

impl Default for HolidayClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the bank holiday feed.
#[derive(Debug, Clone)]
pub struct HolidayClient {
    http: reqwest::Client,
    url: String,
    division: String,
}

impl HolidayClient {
    pub fn new(config: HolidayClientConfig) -> Result<Self, HolidayError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
            division: config.division,
        })
    }

    /// Fetch the configured division.
    pub async fn fetch(&self) -> Result<HolidayDivision, HolidayError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(HolidayError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_division(&body, &self.division)
    }
}

/// Extract one division from a full feed body.
fn parse_division(body: &str, division: &str) -> Result<HolidayDivision, HolidayError> {
    let mut divisions: HashMap<String, HolidayDivision> =
        serde_json::from_str(body).map_err(|e| HolidayError::Json {
            message: e.to_string(),
        })?;

    divisions
        .remove(division)
        .ok_or_else(|| HolidayError::MissingDivision(division.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "england-and-wales": {
            "division": "england-and-wales",
            "events": [
                {"title": "Good Friday", "date": "2024-03-29", "notes": "", "bunting": false},
                {"title": "Easter Monday", "date": "2024-04-01", "notes": "", "bunting": true}
            ]
        },
        "scotland": {
            "division": "scotland",
            "events": [
                {"title": "2nd January", "date": "2024-01-02", "notes": "", "bunting": true}
            ]
        }
    }"#;

    #[test]
    fn config_defaults() {
        let config = HolidayClientConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.division, ENGLAND_AND_WALES);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = HolidayClientConfig::new()
            .with_url("http://localhost:8080/holidays.json")
            .with_division("scotland");
        assert_eq!(config.url, "http://localhost:8080/holidays.json");
        assert_eq!(config.division, "scotland");
    }

    #[test]
    fn parses_requested_division() {
        let division = parse_division(FEED, ENGLAND_AND_WALES).unwrap();
        assert_eq!(division.division, "england-and-wales");
        assert_eq!(division.events.len(), 2);
        assert_eq!(division.events[1].title, "Easter Monday");
    }

    #[test]
    fn missing_division_is_error() {
        let err = parse_division(FEED, "northern-ireland").unwrap_err();
        assert!(matches!(err, HolidayError::MissingDivision(_)));
    }

    #[test]
    fn malformed_body_is_error() {
        let err = parse_division("<html>", ENGLAND_AND_WALES).unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn client_creation() {
        assert!(HolidayClient::new(HolidayClientConfig::default()).is_ok());
    }
}
