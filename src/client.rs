//! Authenticated HTTP client for the OpenSky Network REST API.

use crate::auth::{AuthError, Credentials, TokenManager, DEFAULT_TOKEN_SKEW, DEFAULT_TOKEN_URL};
use crate::protocol::{self, DecodeError, StatesResponse};
use crate::query::{StateFilter, ValidationError};
use crate::types::StateVector;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Base path of the REST API.
pub const DEFAULT_BASE_URL: &str = "https://opensky-network.org/api";

/// Response header carrying the remaining request credits.
const RATE_LIMIT_HEADER: &str = "x-rate-limit-remaining";

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid query: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("server returned error status: {status}")]
    Api { status: StatusCode },
    #[error("malformed state record: {0}")]
    Decode(#[from] DecodeError),
}

/// Configuration for the OpenSky client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth2 client credentials. Without them the client issues
    /// unauthenticated requests, subject to the feed's lower rate limit.
    pub credentials: Option<Credentials>,
    /// Request timeout for both the token and data endpoints.
    pub timeout: Duration,
    /// Freshness margin for stored bearer tokens.
    pub token_skew: Duration,
    /// REST API base URL.
    pub base_url: String,
    /// OAuth2 token endpoint URL.
    pub token_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout: Duration::from_secs(30),
            token_skew: DEFAULT_TOKEN_SKEW,
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(client_id, client_secret));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_skew(mut self, skew: Duration) -> Self {
        self.token_skew = skew;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

/// Client for querying aircraft state vectors.
///
/// One instance may be shared across tasks; the credential session and
/// the credit counter are the only mutable state and both sit behind
/// their own lock.
pub struct OpenSkyClient {
    http: Client,
    base_url: String,
    tokens: TokenManager,
    remaining_credits: RwLock<Option<u64>>,
}

impl OpenSkyClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        let tokens = TokenManager::new(
            http.clone(),
            config.token_url,
            config.credentials,
            config.token_skew,
        );

        Ok(Self {
            http,
            base_url: config.base_url,
            tokens,
            remaining_credits: RwLock::new(None),
        })
    }

    /// Fetch state vectors for aircraft matching `filter`.
    ///
    /// An out-of-range bounding box fails before any network traffic.
    /// Authentication and transport failures surface unchanged, and any
    /// non-2xx status is an [`Error::Api`] even when the error body would
    /// parse as JSON.
    pub async fn get_states(&self, filter: &StateFilter) -> Result<Vec<StateVector>, Error> {
        let params = filter.to_query_params()?;
        let url = format!("{}/states/all", self.base_url);

        tracing::debug!("fetching {} with {} parameters", url, params.len());

        let response = self.dispatch(self.http.get(&url).query(&params)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api { status });
        }

        let body: StatesResponse = response.json().await?;
        Ok(protocol::decode_states(&body)?)
    }

    /// Remaining request credits reported by the last completed call, or
    /// `None` if no call has reported any yet.
    pub fn remaining_credits(&self) -> Option<u64> {
        *self.remaining_credits.read()
    }

    /// Attach a fresh bearer token if one is available, execute the call
    /// exactly once, and record rate-limit telemetry from the response.
    ///
    /// A refresh failure propagates without the data call being attempted;
    /// status codes of the data call itself are the caller's to interpret.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, Error> {
        let request = match self.tokens.ensure_fresh().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        self.record_credits(&response);

        Ok(response)
    }

    fn record_credits(&self, response: &Response) {
        let credits = response
            .headers()
            .get(RATE_LIMIT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        // Absent or unparseable header: keep the last observed value.
        if let Some(credits) = credits {
            tracing::debug!("{} request credits remaining", credits);
            *self.remaining_credits.write() = Some(credits);
        }
    }
}
