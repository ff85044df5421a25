//! Network capability consumed by the sources.
//!
//! Sources only describe requests and a retry budget; the [`Requester`] owns
//! scheduling, timeouts and backoff. [`HttpRequester`] is the reqwest-backed
//! default; hosts embedding the crate can plug in their own.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};

/// Attempts granted to every request issued by a source.
pub const RETRY_BUDGET: u32 = 3;

const MAX_BACKOFF: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub url: String,
    pub method: Method,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into(), method: Method::Get, headers: Vec::new() }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub data: String,
}

#[async_trait]
pub trait Requester: Send + Sync {
    /// Resolve `request`, trying at most `retries` times before failing.
    async fn schedule(&self, request: &Request, retries: u32) -> Result<Response>;
}

#[derive(Clone)]
pub struct HttpRequester {
    client: reqwest::Client,
    retry_delay: Duration,
}

impl HttpRequester {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_millis(config.call_timeout_ms()))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client, retry_delay: Duration::from_millis(config.retry_delay_ms()) })
    }

    /// Doubles per attempt, capped at [`MAX_BACKOFF`].
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_delay.checked_mul(factor).map_or(MAX_BACKOFF, |d| d.min(MAX_BACKOFF))
    }
}

fn retryable(status: u16) -> bool {
    status == 429 || status >= 500
}

#[async_trait]
impl Requester for HttpRequester {
    async fn schedule(&self, request: &Request, retries: u32) -> Result<Response> {
        let attempts = retries.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            debug!(url = %request.url, attempt, "fetching");

            let failure = match builder.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if resp.status().is_success() {
                        let data = resp.text().await.map_err(|e| Error::Fetch {
                            url: request.url.clone(),
                            attempts: attempt,
                            reason: e.to_string(),
                        })?;
                        return Ok(Response { status, data });
                    }
                    if !retryable(status) || attempt >= attempts {
                        return Err(Error::Status { url: request.url.clone(), status });
                    }
                    format!("HTTP {}", status)
                }
                Err(e) => {
                    if attempt >= attempts {
                        return Err(Error::Fetch {
                            url: request.url.clone(),
                            attempts: attempt,
                            reason: e.to_string(),
                        });
                    }
                    e.to_string()
                }
            };

            warn!(url = %request.url, attempt, reason = %failure, "request failed, retrying");
            tokio::time::sleep(self.backoff(attempt)).await;
        }
    }
}
