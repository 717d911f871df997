use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Request, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::PollError;
use crate::models::ApiFailure;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of homework status batches.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Returns the raw JSON body for statuses changed since `from_date`.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, PollError>;
}

pub struct PracticumClient {
    http: reqwest::Client,
    token: String,
}

impl PracticumClient {
    pub fn new(token: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            token: token.into(),
        })
    }

    /// `GET <ENDPOINT>?from_date=<ts>` with the OAuth header.
    fn statuses_request(&self, from_date: i64) -> reqwest::Result<Request> {
        self.http
            .get(ENDPOINT)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .build()
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, PollError> {
        let transport = |source| PollError::Transport {
            endpoint: ENDPOINT.to_string(),
            source,
        };

        let request = self.statuses_request(from_date).map_err(transport)?;
        let resp = self.http.execute(request).await.map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;

        tracing::debug!(status = status.as_u16(), from_date, "Status API responded");

        interpret_response(status, &body)
    }
}

/// Turns a raw HTTP reply into the JSON body, or the error it represents.
///
/// The status code is checked before the body is looked at; a 200 can still
/// carry an API-level failure in its `code` field.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Value, PollError> {
    if status != StatusCode::OK {
        return Err(PollError::HttpStatus(status.as_u16()));
    }

    let parsed: Value = serde_json::from_str(body).map_err(PollError::ResponseFormat)?;

    // Only objects can carry a code; anything else is left to shape validation.
    if let Ok(failure) = ApiFailure::deserialize(&parsed) {
        if failure.is_fatal_code() {
            return Err(PollError::Api(failure.error_text()));
        }
    }

    Ok(parsed)
}
