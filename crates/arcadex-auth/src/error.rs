//! Credential error types.

use thiserror::Error;

/// Provisioning failed. Always fatal: a credential scheme must not run on
/// material produced by a degraded random source.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The operating system random source could not be read.
    #[error("random source unavailable: {0}")]
    Random(#[from] rand::Error),

    /// RSA key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] rsa::Error),

    /// Generated key material could not be serialized.
    #[error("key encoding failed: {0}")]
    Encoding(String),
}

/// Stored key material could not be decoded.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("TOTP secret is not valid Base32")]
    InvalidTotpSecret,

    #[error("RSA key is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("RSA key is malformed: {0}")]
    Malformed(String),
}
