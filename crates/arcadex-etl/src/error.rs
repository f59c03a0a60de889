//! Import error types.

use thiserror::Error;

/// Errors that can occur while talking to the catalog API.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The catalog API answered with a status the importer does not handle.
    #[error("unexpected status {status} from catalog API: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured credential could not be decoded.
    #[error("credential error: {0}")]
    Credential(#[from] arcadex_auth::KeyError),

    /// No TOTP secret is configured, so requests cannot be authorized.
    #[error("no TOTP secret configured")]
    MissingCredential,

    /// An error propagated from the core domain layer.
    #[error("source error: {0}")]
    Source(#[from] arcadex_core::Error),
}

impl ImportError {
    /// Returns `true` when the error is transient and the request may
    /// succeed if issued again later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Convenience alias for import results.
pub type ImportResult<T> = std::result::Result<T, ImportError>;
