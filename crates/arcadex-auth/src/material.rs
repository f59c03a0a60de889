//! Credential material generation.
//!
//! Runs once at provisioning time. Keys are handed back in their storage
//! form: the PEM body with envelope lines and line breaks removed, leaving
//! one unbroken base64 token per key.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

use crate::error::{GenerationError, KeyError};
use crate::totp::TotpSecret;

/// Length in bytes of a freshly generated TOTP secret.
pub const TOTP_SECRET_LEN: usize = 20;

pub const RSA_KEY_BITS: usize = 2048;
pub const RSA_PUBLIC_EXPONENT: u32 = 65_537;

/// Secrets produced by one provisioning run, in storage form.
#[derive(Clone, PartialEq, Eq)]
pub struct ProvisionedSecrets {
    /// Base32 shared secret for time-based codes.
    pub totp_secret: String,
    /// SubjectPublicKeyInfo DER, base64.
    pub rsa_public_key: String,
    /// PKCS#1 DER, base64.
    pub rsa_private_key: String,
}

impl ProvisionedSecrets {
    /// Generate a TOTP secret and an RSA key pair.
    pub fn generate() -> Result<Self, GenerationError> {
        let totp_secret = generate_totp_secret()?;
        let (rsa_private_key, rsa_public_key) = generate_keypair()?;
        Ok(Self {
            totp_secret,
            rsa_public_key,
            rsa_private_key,
        })
    }
}

impl fmt::Debug for ProvisionedSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedSecrets")
            .field("totp_secret", &"<redacted>")
            .field("rsa_public_key", &self.rsa_public_key)
            .field("rsa_private_key", &"<redacted>")
            .finish()
    }
}

/// Produce 20 random bytes from the OS source, Base32 encoded.
pub fn generate_totp_secret() -> Result<String, GenerationError> {
    let mut bytes = [0u8; TOTP_SECRET_LEN];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(TotpSecret::from_bytes(bytes.to_vec()).to_base32())
}

/// Produce a 2048-bit RSA key pair with public exponent 65537.
///
/// Returns `(private, public)` in storage form: PKCS#1 for the private key,
/// SubjectPublicKeyInfo for the public key.
pub fn generate_keypair() -> Result<(String, String), GenerationError> {
    let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);
    let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, RSA_KEY_BITS, &exponent)?;
    let public_key = private_key.to_public_key();

    let private_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| GenerationError::Encoding(e.to_string()))?;
    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| GenerationError::Encoding(e.to_string()))?;

    Ok((strip_pem(&private_pem), strip_pem(&public_pem)))
}

/// Remove PEM envelope lines and all whitespace from `pem`.
///
/// Text that is already in storage form passes through unchanged.
pub fn strip_pem(pem: &str) -> String {
    pem.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("-----"))
        .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
        .collect()
}

/// Decode a stored SubjectPublicKeyInfo public key.
pub fn decode_public_key(stored: &str) -> Result<RsaPublicKey, KeyError> {
    let der = STANDARD.decode(strip_pem(stored))?;
    RsaPublicKey::from_public_key_der(&der).map_err(|e| KeyError::Malformed(e.to_string()))
}

/// Decode a stored PKCS#1 private key.
pub fn decode_private_key(stored: &str) -> Result<RsaPrivateKey, KeyError> {
    let der = STANDARD.decode(strip_pem(stored))?;
    RsaPrivateKey::from_pkcs1_der(&der).map_err(|e| KeyError::Malformed(e.to_string()))
}
