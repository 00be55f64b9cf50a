use crate::types::WeatherError;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://gfeljm.tianqiapi.com/api";
pub const DEFAULT_API_VERSION: &str = "v9";
const USER_AGENT: &str = concat!("tianqi/", env!("CARGO_PKG_VERSION"));

/// Base URL and credentials of the forecast API
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    base_url: Url,
    app_id: String,
    app_secret: String,
    version: String,
    unescape: bool,
}

impl ApiEndpoint {
    /// # Errors
    ///
    /// Returns `WeatherError::Url` if `base_url` doesn't parse.
    pub fn new(
        base_url: &str,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            version: DEFAULT_API_VERSION.to_string(),
            unescape: true,
        })
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_unescape(mut self, unescape: bool) -> Self {
        self.unescape = unescape;
        self
    }

    /// Request URL for `city_code`; without a code the API locates the caller by IP.
    ///
    /// The query string is rebuilt on every call, so codes never accumulate.
    pub fn forecast_url(&self, city_code: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            if self.unescape {
                query.append_pair("unescape", "1");
            }
            query
                .append_pair("version", &self.version)
                .append_pair("appid", &self.app_id)
                .append_pair("appsecret", &self.app_secret);
            if let Some(code) = city_code {
                query.append_pair("cityid", code);
            }
        }
        url
    }
}

/// HTTP transport for forecast responses
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    endpoint: ApiEndpoint,
}

impl WeatherProvider {
    /// # Errors
    ///
    /// Returns `WeatherError::Network` if the HTTP client can't be built.
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoint,
        })
    }

    /// Fetch the raw forecast body for `city_code`.
    ///
    /// # Errors
    ///
    /// Returns `Network` on transport failure and `HttpStatus` for any
    /// status other than 200.
    pub async fn fetch_raw(&self, city_code: Option<&str>) -> Result<Vec<u8>, WeatherError> {
        let url = self.endpoint.forecast_url(city_code);
        tracing::debug!(
            "Requesting forecast from {} (cityid={})",
            self.endpoint.base_url,
            city_code.unwrap_or("auto")
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Weather API returned status {}", status);
            return Err(WeatherError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes of forecast data", body.len());
        Ok(body.to_vec())
    }
}
