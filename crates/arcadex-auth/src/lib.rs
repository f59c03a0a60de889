//! Credentials guarding the arcadex catalog API.
//!
//! Two proofs of authorization are accepted on a bearer credential:
//!
//! - a six-digit time-based one-time code derived from a shared secret
//!   (HMAC-SHA1, 30 second steps), and
//! - a signed challenge `base64(data).base64(signature)` checked against a
//!   stored RSA public key (PKCS#1 v1.5, SHA-256).
//!
//! [`material`] provisions the secrets once; [`Verifier`] checks inbound
//! tokens and holds no mutable state, so one instance can be shared by
//! every request handler.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod material;
pub mod signed;
pub mod totp;
pub mod verifier;

pub use error::{GenerationError, KeyError};
pub use material::{generate_keypair, generate_totp_secret, ProvisionedSecrets};
pub use signed::sign_challenge;
pub use totp::{current_totp, totp_code, TotpSecret};
pub use verifier::{token_from_authorization, RejectReason, Verification, Verifier};
