//! HTTP client for fetching boundary data.

mod response;
mod user_agent;

pub use response::HttpResponse;
pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::Client;

use crate::error::{MapError, MapResult};

/// HTTP client with request logging.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// `timeout` of None means requests wait until the server answers or the
    /// connection drops.
    pub fn new(user_agent_config: Option<&str>, timeout: Option<Duration>) -> MapResult<Self> {
        let user_agent = resolve_user_agent(user_agent_config);
        let mut builder = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MapError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Make a GET request.
    ///
    /// Transport failures are errors; the status code is left for the caller
    /// to judge.
    pub async fn get(&self, url: &str) -> MapResult<HttpResponse> {
        tracing::debug!("GET {}", url);

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| MapError::Http {
                url: url.to_string(),
                source,
            })?;
        let duration = start.elapsed();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.to_string(), v.to_string());
            }
        }

        tracing::debug!(
            "GET {} -> {} in {}ms",
            url,
            response.status().as_u16(),
            duration.as_millis()
        );

        Ok(HttpResponse {
            url: url.to_string(),
            status: response.status(),
            headers,
            response,
        })
    }

    /// GET a URL and return the body, failing on any non-success status.
    pub async fn get_bytes(&self, url: &str) -> MapResult<Vec<u8>> {
        let response = self.get(url).await?;
        if !response.is_success() {
            return Err(MapError::Status {
                url: url.to_string(),
                status: response.status.as_u16(),
            });
        }

        if let Some(content_type) = response.content_type() {
            tracing::debug!("Content-Type: {}", content_type);
        }
        if let Some(len) = response.content_length() {
            tracing::debug!("Content-Length: {}", len);
        }

        let url = response.url.clone();
        response
            .bytes()
            .await
            .map_err(|source| MapError::Http { url, source })
    }
}
