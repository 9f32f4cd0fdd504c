use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[cfg(feature = "network")]
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("built without network support")]
    Disabled,
}

/// Remote word-list retrieval. A single attempt per call, no retries.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

pub struct HttpFetcher {
    #[cfg_attr(not(feature = "network"), allow(dead_code))]
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[cfg(feature = "network")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response.text()?)
        } else {
            Err(FetchError::Status(status.as_u16()))
        }
    }
}

#[cfg(not(feature = "network"))]
impl Fetcher for HttpFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::Disabled)
    }
}
