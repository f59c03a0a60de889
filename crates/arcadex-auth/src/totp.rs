//! Time-based one-time codes (RFC 6238 over HMAC-SHA1).

use std::fmt;

use base32::Alphabet;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::KeyError;

type HmacSha1 = Hmac<Sha1>;

pub const TOTP_STEP_SECS: u64 = 30;
pub const TOTP_DIGITS: usize = 6;
const TOTP_MODULUS: u32 = 1_000_000;

/// A decoded TOTP shared secret.
#[derive(Clone, PartialEq, Eq)]
pub struct TotpSecret(Vec<u8>);

impl TotpSecret {
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a stored Base32 secret. Case, spaces and trailing `=` padding
    /// are tolerated.
    pub fn from_base32(encoded: &str) -> Result<Self, KeyError> {
        let cleaned: String = encoded
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '=')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match base32::decode(Alphabet::Rfc4648 { padding: false }, &cleaned) {
            Some(bytes) if !bytes.is_empty() => Ok(Self(bytes)),
            _ => Err(KeyError::InvalidTotpSecret),
        }
    }

    #[must_use]
    pub fn to_base32(&self) -> String {
        base32::encode(Alphabet::Rfc4648 { padding: true }, &self.0)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TotpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TotpSecret(<redacted>)")
    }
}

/// The time step containing `unix_time`.
#[must_use]
pub const fn time_step(unix_time: u64) -> u64 {
    unix_time / TOTP_STEP_SECS
}

/// The six-digit code for the step containing `unix_time`.
#[must_use]
pub fn totp_code(secret: &TotpSecret, unix_time: u64) -> String {
    hotp(secret.as_bytes(), time_step(unix_time))
}

/// The six-digit code for the current time.
#[must_use]
pub fn current_totp(secret: &TotpSecret) -> String {
    totp_code(secret, unix_now())
}

pub(crate) fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// HOTP (RFC 4226) value for `counter`, zero-padded to six digits.
pub(crate) fn hotp(key: &[u8], counter: u64) -> String {
    let Ok(mut mac) = HmacSha1::new_from_slice(key) else {
        unreachable!("HMAC accepts keys of any length");
    };
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation
    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    format!("{:0width$}", binary % TOTP_MODULUS, width = TOTP_DIGITS)
}
