use std::fmt;
use std::sync::Arc;

use http_client::{ClientConfig, HttpClient, ReqwestClient};

use crate::channel::{decode_read, ChannelProperty, ChannelValue};
use crate::{ApiError, Endpoint, Result};

/// A client for executing channel reads and writes against a device
///
/// Every call issues exactly one GET and interprets the result; there is no
/// retry, no caching and no coalescing of concurrent calls. The client is
/// cheap to clone and holds no per-device state.
#[derive(Clone)]
pub struct LightClient {
    http: Arc<dyn HttpClient>,
}

impl LightClient {
    /// Create a client on top of a default `reqwest` transport
    pub fn new() -> Self {
        Self {
            http: Arc::new(ReqwestClient::new()),
        }
    }

    /// Create a client whose transport uses `config`
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestClient::with_config(config)?;
        Ok(Self {
            http: Arc::new(transport),
        })
    }

    /// Create a client over a custom transport
    pub fn with_http_client(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Read the current value of channel `P`
    ///
    /// # Example
    /// ```rust,no_run
    /// use grlight_api::{DeviceIdentity, Endpoint, LightClient};
    /// use grlight_api::channel::Brightness;
    ///
    /// # async fn run() -> grlight_api::Result<()> {
    /// let endpoint = Endpoint::new(&DeviceIdentity::new("Desk", "10.0.0.5"))?;
    /// let level = LightClient::new().read::<Brightness>(&endpoint).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read<P: ChannelProperty>(&self, endpoint: &Endpoint) -> Result<P::Value> {
        let body = self.fetch(&endpoint.read_url(P::CHANNEL)).await?;
        decode_read::<P>(&body)
    }

    /// Apply `value` on the device
    ///
    /// The response body is ignored; success only means the device answered
    /// with a 2xx status.
    pub async fn write(&self, endpoint: &Endpoint, value: &ChannelValue) -> Result<()> {
        self.fetch(&endpoint.write_url(value)).await.map(|_| ())
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::trace!(url, "sending device request");

        let response = self.http.get(url).await?;
        if !response.is_success() {
            return Err(ApiError::Protocol {
                status: response.status,
                url: url.to_string(),
            });
        }

        Ok(response.body)
    }
}

impl Default for LightClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LightClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightClient").finish_non_exhaustive()
    }
}
