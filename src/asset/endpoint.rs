use std::time::Duration;

use crate::asset::error::AssetError;
use crate::config::Config;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;

/// Network seam toward the metadata endpoint. Implementations must be
/// shareable across probe workers.
pub trait Endpoint: Send + Sync {
    /// Issues one request for `id` and returns the HTTP status code.
    /// Transport failures carry no status and are reported as the error
    /// message instead.
    fn status(&self, id: u32) -> Result<u16, String>;

    /// Full fetch of the metadata body. Fails unless the status is 200.
    fn body(&self, id: u32) -> Result<Vec<u8>, AssetError>;
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn status(&self, id: u32) -> Result<u16, String> {
        (**self).status(id)
    }

    fn body(&self, id: u32) -> Result<Vec<u8>, AssetError> {
        (**self).body(id)
    }
}

/// Blocking HTTP client against `{base}/{id}.json` with a fixed
/// per-request timeout.
pub struct HttpEndpoint {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpEndpoint {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn url(&self, id: u32) -> String {
        format!("{}/{}.json", self.base_url, id)
    }
}

impl Endpoint for HttpEndpoint {
    fn status(&self, id: u32) -> Result<u16, String> {
        let response = self
            .client
            .get(self.url(id))
            .send()
            .map_err(|err| err.to_string())?;

        Ok(response.status().as_u16())
    }

    fn body(&self, id: u32) -> Result<Vec<u8>, AssetError> {
        let response = self
            .client
            .get(self.url(id))
            .send()
            .map_err(|source| AssetError::Transport { id, source })?;

        match response.status().as_u16() {
            STATUS_NOT_FOUND => Err(AssetError::NotFound { id }),
            STATUS_OK => response
                .bytes()
                .map(|body| body.to_vec())
                .map_err(|source| AssetError::Body { id, source }),
            status => Err(AssetError::HttpStatus { id, status }),
        }
    }
}
