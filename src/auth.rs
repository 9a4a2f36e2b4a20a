//! OAuth2 client-credentials token management.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

/// Token endpoint of the OpenSky auth server.
pub const DEFAULT_TOKEN_URL: &str =
    "https://auth.opensky-network.org/auth/realms/opensky-network/protocol/openid-connect/token";

/// Default freshness margin: a token expiring within this window is
/// treated as already stale.
pub const DEFAULT_TOKEN_SKEW: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("token endpoint returned error status: {status}")]
    Status { status: StatusCode },
    #[error("token response missing access_token or expires_in")]
    MalformedResponse,
}

/// OAuth2 client credentials, immutable once the client is built.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// A bearer token and the instant it stops being usable. Keeping both in
/// one value makes "token without expiry" unrepresentable.
#[derive(Debug, Clone)]
struct BearerToken {
    access_token: String,
    expires_at: Instant,
}

impl BearerToken {
    /// A token is fresh only while its expiry lies more than `skew` in
    /// the future. "Expires within the next skew window" counts as stale,
    /// so a request in flight cannot race server-side expiry.
    fn is_fresh(&self, now: Instant, skew: Duration) -> bool {
        self.expires_at > now + skew
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// Owns the credential session: acquires bearer tokens via the OAuth2
/// client-credentials grant and judges their freshness.
///
/// The session lives behind an async mutex that is held across the token
/// request, so concurrent callers finding a stale token coalesce onto a
/// single refresh.
pub struct TokenManager {
    http: Client,
    token_url: String,
    credentials: Option<Credentials>,
    skew: Duration,
    session: Mutex<Option<BearerToken>>,
}

impl TokenManager {
    pub fn new(
        http: Client,
        token_url: String,
        credentials: Option<Credentials>,
        skew: Duration,
    ) -> Self {
        Self {
            http,
            token_url,
            credentials,
            skew,
            session: Mutex::new(None),
        }
    }

    /// Return a bearer token that is safe to attach to a request,
    /// refreshing first if none is stored or the stored one is stale.
    /// `None` means the client operates unauthenticated.
    pub async fn ensure_fresh(&self) -> Result<Option<String>, AuthError> {
        let mut session = self.session.lock().await;

        if let Some(token) = session.as_ref() {
            if token.is_fresh(Instant::now(), self.skew) {
                return Ok(Some(token.access_token.clone()));
            }
        }

        self.refresh_locked(&mut session).await?;
        Ok(session.as_ref().map(|t| t.access_token.clone()))
    }

    /// Discard the stored token and acquire a new one.
    ///
    /// Without credentials this clears the session and succeeds: the
    /// client degrades to unauthenticated mode instead of failing.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let mut session = self.session.lock().await;
        self.refresh_locked(&mut session).await
    }

    async fn refresh_locked(
        &self,
        session: &mut Option<BearerToken>,
    ) -> Result<(), AuthError> {
        // Clear up front: a failed refresh must never leave a stale token
        // behind for the next call to reuse.
        *session = None;

        let Some(credentials) = &self.credentials else {
            return Ok(());
        };

        match self.request_token(credentials).await {
            Ok(token) => {
                *session = Some(token);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("token refresh failed: {}", e);
                Err(e)
            }
        }
    }

    async fn request_token(&self, credentials: &Credentials) -> Result<BearerToken, AuthError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self.http.post(&self.token_url).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status { status });
        }

        let body: TokenResponse = response.json().await?;
        let (Some(access_token), Some(expires_in)) = (body.access_token, body.expires_in) else {
            return Err(AuthError::MalformedResponse);
        };

        tracing::debug!("obtained bearer token, expires in {}s", expires_in);

        Ok(BearerToken {
            access_token,
            expires_at: Instant::now() + Duration::from_secs(expires_in),
        })
    }
}
