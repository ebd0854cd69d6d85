use crate::normalize::{normalize_sports, normalize_tournaments, parse_tournaments};
use crate::wire::{SportsListResponse, TournamentsResponse};
use crate::{Sport, Tournament};
use chrono::Utc;
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE_URL: &str = "https://stapubox.com";
const SPORTS_PATH: &str = "/sportslist";
const TOURNAMENTS_PATH: &str = "/tournament/demo";

pub const ENV_API_BASE: &str = "TOURCAL_API_BASE";
pub const ENV_TOURNAMENTS_JSON: &str = "TOURCAL_TOURNAMENTS_JSON";

#[derive(Debug)]
pub enum ApiError {
    /// A timestamp did not parse. Recovered locally, never shown.
    InvalidTimestamp(String),
    InvalidMonth(u32),
    /// The response is not the expected success shape.
    MalformedPayload(String),
    TransportFailure(String),
    CacheUnavailable(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidTimestamp(raw) => write!(f, "Invalid timestamp: {raw:?}"),
            ApiError::InvalidMonth(month) => write!(f, "Invalid month: {month}"),
            ApiError::MalformedPayload(msg) => write!(f, "Malformed payload: {msg}"),
            ApiError::TransportFailure(msg) => write!(f, "Request failed: {msg}"),
            ApiError::CacheUnavailable(msg) => write!(f, "Cache unavailable: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client for the sports list and tournament endpoints.
#[derive(Debug, Clone)]
pub struct TournamentApi {
    client: Client,
    base_url: String,
    timeout: Duration,
    local_payload: Option<PathBuf>,
}

impl Default for TournamentApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("tourcal/0.1 (terminal tournament calendar)")
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(10),
            local_payload: None,
        }
    }
}

impl TournamentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client configured from the environment:
    /// - `TOURCAL_API_BASE`: alternative base URL.
    /// - `TOURCAL_TOURNAMENTS_JSON`: read tournaments from a local payload file.
    pub fn from_env() -> Self {
        let mut api = Self::default();
        if let Ok(base) = std::env::var(ENV_API_BASE)
            && !base.trim().is_empty()
        {
            api = api.with_base_url(base.trim());
        }
        if let Ok(path) = std::env::var(ENV_TOURNAMENTS_JSON)
            && !path.trim().is_empty()
        {
            api.local_payload = Some(PathBuf::from(path.trim()));
        }
        api
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sports for the picker, sentinel first. Never fails: any error leaves
    /// the sentinel as the only entry.
    pub async fn fetch_sports(&self) -> Vec<Sport> {
        let url = format!("{}{SPORTS_PATH}", self.base_url);
        match self.get::<SportsListResponse>(&url).await {
            Ok(raw) => normalize_sports(raw),
            Err(e) => {
                log::warn!("sports list unavailable: {e}");
                vec![Sport::sentinel()]
            }
        }
    }

    /// All tournaments, flattened across sports and sorted by start date.
    pub async fn fetch_tournaments(&self) -> ApiResult<Vec<Tournament>> {
        if let Some(path) = &self.local_payload {
            let body = std::fs::read_to_string(path).map_err(|e| {
                ApiError::TransportFailure(format!("could not read {}: {e}", path.display()))
            })?;
            return parse_tournaments(&body, Utc::now());
        }

        let url = format!("{}{TOURNAMENTS_PATH}", self.base_url);
        let raw: TournamentsResponse = self.get(&url).await?;
        normalize_tournaments(raw, Utc::now())
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::TransportFailure(format!("{url}: {e}")))?;

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::TransportFailure(format!("{url}: {e}")))?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::MalformedPayload(format!("{url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = TournamentApi::new().with_base_url("http://localhost:9000/");
        assert_eq!(api.base_url, "http://localhost:9000");
    }

    #[test]
    fn display_messages() {
        assert_eq!(ApiError::InvalidMonth(13).to_string(), "Invalid month: 13");
        assert_eq!(
            ApiError::InvalidTimestamp("soon".into()).to_string(),
            "Invalid timestamp: \"soon\""
        );
    }

    #[tokio::test]
    async fn local_payload_replaces_the_request() {
        let path = std::env::temp_dir().join(format!("tourcal-local-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"status": "success", "data": [{"sport_id": 2, "sport_name": "Football",
                "tournaments": [{"id": 9, "name": "Derby Week", "start_date": "2025-09-03"}]}]}"#,
        )
        .unwrap();

        let mut api = TournamentApi::new().with_base_url("http://127.0.0.1:1");
        api.local_payload = Some(path.clone());
        let tournaments = api.fetch_tournaments().await.unwrap();
        assert_eq!(tournaments.len(), 1);
        assert_eq!(tournaments[0].name, "Derby Week");

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            api.fetch_tournaments().await,
            Err(ApiError::TransportFailure(_))
        ));
    }
}
