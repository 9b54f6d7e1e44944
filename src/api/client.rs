use std::time::Duration;

use chrono::{
    DateTime,
    Utc,
};
use reqwest::{
    Client,
    StatusCode,
};
use serde::{
    de::DeserializeOwned,
    Deserialize,
};

use super::{
    AssignmentFilter,
    WaniKaniApi,
};
use crate::core::{
    models::{
        Assignment,
        Collection,
        LevelProgression,
        User,
    },
    time::format_utc,
    WaniKaniError,
};

pub const API_BASE_URL: &str = "https://api.wanikani.com/v2";
pub const WANIKANI_REVISION: &str = "20170710";

/// HTTP client for the WaniKani v2 API. Owns the access token and injects
/// the bearer and revision headers on every request.
pub struct WaniKaniClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl WaniKaniClient {
    pub fn new(access_token: impl Into<String>) -> Result<Self, WaniKaniError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WaniKaniError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { http, base_url: API_BASE_URL.to_string(), access_token: access_token.into() })
    }

    /// Point the client at a different base URL. Useful for proxies and
    /// local stand-ins of the API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Checks the access token by fetching the account it belongs to.
    /// Any non-200 here means the token is bad, not that the API is down.
    pub async fn verify_credentials(&self) -> Result<User, WaniKaniError> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .bearer_auth(&self.access_token)
            .header("Wanikani-Revision", WANIKANI_REVISION)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(WaniKaniError::InvalidAccessToken);
        }

        #[derive(Deserialize)]
        struct UserEnvelope {
            data: User,
        }

        let envelope: UserEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        error_prefix: &str,
    ) -> Result<T, WaniKaniError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.access_token)
            .header("Wanikani-Revision", WANIKANI_REVISION)
            .query(query)
            .send()
            .await
            .map_err(|e| WaniKaniError::Api(format!("{error_prefix}: {e}")))?;

        let status = response.status();
        let content = response
            .text()
            .await
            .map_err(|e| WaniKaniError::Api(format!("{error_prefix}: {e}")))?;

        if !status.is_success() {
            let error = normalize_error(error_prefix, status, &content);
            eprintln!("WaniKani API error: {error}");
            return Err(error);
        }

        serde_json::from_str(&content)
            .map_err(|e| WaniKaniError::Api(format!("{error_prefix}: {e}")))
    }
}

impl WaniKaniApi for WaniKaniClient {
    async fn assignments(
        &self,
        filter: &AssignmentFilter,
        error_prefix: &str,
    ) -> Result<Collection<Assignment>, WaniKaniError> {
        self.get_json("/assignments", &filter.to_query(), error_prefix).await
    }

    async fn level_progressions(
        &self,
        updated_after: DateTime<Utc>,
        error_prefix: &str,
    ) -> Result<Collection<LevelProgression>, WaniKaniError> {
        let query = [("updated_after", format_utc(updated_after))];
        self.get_json("/level_progressions", &query, error_prefix).await
    }
}

/// WaniKani error payloads look like `{"error": "...", "code": 401}`. When
/// the body carries a message, surface it behind the stage prefix; otherwise
/// fall back to the status code and raw body.
fn normalize_error(prefix: &str, status: StatusCode, content: &str) -> WaniKaniError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    if let Ok(body) = serde_json::from_str::<ErrorBody>(content) {
        if let Some(message) = body.error {
            return WaniKaniError::Api(format!("{prefix}: {message}"));
        }
    }

    WaniKaniError::Api(format!("{prefix}. Error code {}: {}", status.as_u16(), content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_error_prefers_upstream_message() {
        let error = normalize_error(
            "Unable to retrieve reviews",
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "some random error", "code": 500}"#,
        );
        assert_eq!(error.to_string(), "Unable to retrieve reviews: some random error");
    }

    #[test]
    fn normalize_error_falls_back_to_status_and_body() {
        let error =
            normalize_error("Unable to retrieve lessons", StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(
            error.to_string(),
            "Unable to retrieve lessons. Error code 502: <html>"
        );
    }
}
