//! HTTP submission of compiled offering queries.

use crate::config::MarketConfig;
use crate::error::client::ClientError;
use crate::error::http::HttpError;
use crate::query::OfferingQuery;

use common::{AccessToken, HttpStatusCode};

use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, info, trace, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep as TokioSleep;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const DISCOVERY_ENDPOINT: &str = "offering/search";
const AUTHORIZATION_HEADER_KEY: &str = "Authorization";
const QUERY_CONTENT_TYPE: &str = "text/plain";
const CONTENT_TYPE_HEADER_KEY: &str = "Content-Type";
const RETRY_MAX_ELAPSED: Duration = Duration::from_secs(20);

/// One discoverable offering, as returned by the marketplace matcher.
///
/// A plain data carrier; matching semantics live on the remote side.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferingDescription {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// Client for the marketplace discovery endpoint.
///
/// Submits compiled query text and hands back offering descriptions. The
/// client holds no mutable state beyond reqwest's internal pool; it is
/// `Clone` and safe to share once constructed.
#[derive(Clone)]
pub struct MarketplaceClient {
    base_url: Url,
    client: Client,
    access_token: Option<AccessToken>,
    retry_transient: bool,
}

impl MarketplaceClient {
    /// Create a client for the marketplace at `base_url_str`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the URL does not parse or the underlying
    /// HTTP client cannot be constructed.
    pub fn new(base_url_str: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url_str)?;
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()?;

        Ok(Self {
            base_url,
            client,
            access_token: None,
            retry_transient: true,
        })
    }

    /// Create a client from a loaded [`MarketConfig`], honoring its
    /// endpoint, timeout and retry settings.
    pub fn from_config(config: &MarketConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.endpoint.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.endpoint.timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            client,
            access_token: None,
            retry_transient: config.endpoint.auto_retry,
        })
    }

    /// Attach a bearer token sent with every request.
    #[must_use]
    pub fn with_access_token(mut self, access_token: AccessToken) -> Self {
        self.access_token = Some(access_token);
        self
    }

    fn prepare_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut request = request;
        if let Some(token) = &self.access_token {
            request = request.header(
                AUTHORIZATION_HEADER_KEY,
                format!("Bearer {}", token.as_str()),
            );
        }
        request
    }

    /// Submit a compiled query and return the matching offerings.
    ///
    /// Transient marketplace failures (429, 502, 503, 504) are retried
    /// with exponential backoff for up to 20 seconds when the client was
    /// configured with auto-retry; all other failures surface immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Marketplace`] carrying an [`HttpError`] for
    /// non-success responses, or the transport/parse variants for failures
    /// below the HTTP layer.
    pub async fn discover(
        &self,
        query: &OfferingQuery,
    ) -> Result<Vec<OfferingDescription>, ClientError> {
        let query_text = query.to_query_string();
        debug!("Submitting offering query {}", query.name());

        let mut backoff = ExponentialBackoff {
            max_elapsed_time: Some(RETRY_MAX_ELAPSED),
            ..Default::default()
        };

        loop {
            match self.submit(&query_text).await {
                Ok(offerings) => {
                    info!(
                        "Query {} matched {} offering(s)",
                        query.name(),
                        offerings.len()
                    );
                    return Ok(offerings);
                }
                Err(ClientError::Marketplace(http_error))
                    if self.retry_transient && http_error.is_retryable() =>
                {
                    match backoff.next_backoff() {
                        Some(duration) => {
                            trace!(
                                "Marketplace returned {}, retrying after {duration:?}",
                                http_error.status()
                            );
                            TokioSleep(duration).await;
                        }
                        None => {
                            warn!(
                                "Marketplace still returning {} after {RETRY_MAX_ELAPSED:?}",
                                http_error.status()
                            );
                            return Err(ClientError::Marketplace(http_error));
                        }
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn submit(&self, query_text: &str) -> Result<Vec<OfferingDescription>, ClientError> {
        let url = self.base_url.join(DISCOVERY_ENDPOINT)?;

        let response = self
            .prepare_request(self.client.post(url))
            .header(CONTENT_TYPE_HEADER_KEY, QUERY_CONTENT_TYPE)
            .body(query_text.to_owned())
            .send()
            .await?;

        let status = HttpStatusCode::from(response.status().as_u16());
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) if !text.is_empty() => Some(text),
                Ok(_) => None,
                Err(read_error) => {
                    return Err(HttpError::with_source(status, None, read_error).into());
                }
            };
            return Err(HttpError::new(status, body).into());
        }

        let json: Value = response.json().await?;
        let offerings: Vec<OfferingDescription> = serde_json::from_value(json)?;

        Ok(offerings)
    }
}
