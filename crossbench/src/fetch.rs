//! Outbound HTTP capability used by the collector.
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Nothing accepted the connection.
    #[error("Endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("No response within {}", humantime::format_duration(.0.clone()))]
    Timeout(Duration),
}

/// A response head. The body is never inspected: arrival is all that matters for latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a bare `GET`: no query string, no body, default headers.
///
/// `Ok` means a response arrived, whatever its status code.
#[trait_variant::make(Fetch: Send)]
pub trait LocalFetch {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// [`Fetch`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

impl From<reqwest::Client> for HttpFetcher {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let res = self.client.get(url).send().await.map_err(|err| {
            if err.is_connect() {
                FetchError::Unreachable(err.to_string())
            } else {
                FetchError::Network(err)
            }
        })?;
        Ok(FetchResponse {
            status: res.status().as_u16(),
        })
    }
}
