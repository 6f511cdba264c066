use std::future::Future;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::configuration::ScraperSettings;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("empty url")]
    EmptyUrl,
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("request failed: {0}")]
    Network(reqwest::Error),
    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),
}

impl FetchError {
    /// Timeouts, connection failures and 5xx responses. Only used for
    /// reporting, nothing is retried.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout => true,
            FetchError::HttpStatus(status) => *status >= 500,
            FetchError::Network(e) => e.is_connect() || e.is_timeout(),
            FetchError::EmptyUrl | FetchError::InvalidUrl(_) | FetchError::Body(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e)
        }
    }
}

pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &ScraperSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout())
            .build()?;

        Ok(HttpFetcher { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::EmptyUrl);
        }
        let url = Url::parse(url)?;

        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        res.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e)
            }
        })
    }
}
