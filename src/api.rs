use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use url::Url;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: Url, timeout: Duration },
    #[error("Unexpected status code: server returned {status} for {url}")]
    Status { url: Url, status: StatusCode },
}

/// Source of job guide pages.
///
/// Every failure mode is reported the same way; callers never retry.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(*config.timeout())
            .connection_verbose(true)
            .build()?;
        Ok(Self {
            client,
            timeout: *config.timeout(),
        })
    }

    fn request_error(&self, url: &Url, source: reqwest::Error) -> FetchError {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.clone(),
                timeout: self.timeout,
            }
        } else {
            FetchError::Request {
                url: url.clone(),
                source,
            }
        }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }
        response.text().await.map_err(|e| self.request_error(url, e))
    }
}
