//! Catalog API client.
//!
//! Songs are created with `POST {base}/api/Songs`. Every request carries a
//! fresh time-based code as its bearer credential.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use arcadex_auth::{current_totp, TotpSecret};
use arcadex_core::CatalogSong;

use crate::config::Config;
use crate::error::{ImportError, ImportResult};

const SONGS_PATH: &str = "/api/Songs";

/// What the catalog did with a create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// A song with the same identity is already cataloged.
    AlreadyExists,
}

/// The operations the importer needs from the catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn create_song(&self, song: &CatalogSong) -> ImportResult<CreateOutcome>;
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    songs_url: String,
    totp_secret: TotpSecret,
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str, totp_secret: TotpSecret, timeout: Duration) -> ImportResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("arcadex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            songs_url: songs_url(base_url),
            totp_secret,
        })
    }
}

impl CatalogClient {
    /// Create a client from loaded configuration.
    ///
    /// `base_url` overrides `api_base_url` when given. Fails if no TOTP
    /// secret is configured or the stored one cannot be decoded.
    pub fn from_config(config: &Config, base_url: Option<&str>) -> ImportResult<Self> {
        let secret = config
            .totp_secret()?
            .ok_or(ImportError::MissingCredential)?;
        let base_url = base_url.unwrap_or(&config.api_base_url);
        Self::new(base_url, secret, config.request_timeout())
    }
}

fn songs_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SONGS_PATH)
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn create_song(&self, song: &CatalogSong) -> ImportResult<CreateOutcome> {
        let response = self
            .http
            .post(&self.songs_url)
            .bearer_auth(current_totp(&self.totp_secret))
            .json(song)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(CreateOutcome::Created),
            StatusCode::CONFLICT => Ok(CreateOutcome::AlreadyExists),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ImportError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
