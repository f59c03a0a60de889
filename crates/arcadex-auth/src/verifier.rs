//! Inbound credential verification.

use std::fmt;

use rsa::RsaPublicKey;

use crate::error::KeyError;
use crate::material::decode_public_key;
use crate::signed;
use crate::totp::{self, TotpSecret, TOTP_DIGITS};

/// Why a credential was refused.
///
/// Deliberately coarse: callers may surface the reason, but it never says
/// which part of a token was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Wrong segment count, undecodable base64, or no token at all.
    MalformedToken,
    TotpMismatch,
    SignatureInvalid,
    /// The scheme the token selects has no secret or key configured.
    NoCredentialConfigured,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MalformedToken => "malformed token",
            Self::TotpMismatch => "one-time code mismatch",
            Self::SignatureInvalid => "invalid signature",
            Self::NoCredentialConfigured => "no credential configured",
        };
        f.write_str(label)
    }
}

/// Outcome of checking one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Accepted,
    Rejected(RejectReason),
}

impl Verification {
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl From<Result<(), RejectReason>> for Verification {
    fn from(result: Result<(), RejectReason>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(reason) => Self::Rejected(reason),
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// A `Bearer ` prefix (any case) is removed; a bare token is also accepted.
pub fn token_from_authorization(header: &str) -> Option<&str> {
    let header = header.trim_start();
    let token = match header.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => header[7..].trim(),
        _ => header.trim(),
    };
    (!token.is_empty()).then_some(token)
}

/// `true` when `token` has the shape of a time-based code.
fn is_totp_shaped(token: &str) -> bool {
    token.len() == TOTP_DIGITS && token.bytes().all(|b| b.is_ascii_digit())
}

/// Checks bearer credentials against the configured secret and public key.
///
/// Read-only after construction.
#[derive(Clone)]
pub struct Verifier {
    totp_secret: Option<TotpSecret>,
    public_key: Option<RsaPublicKey>,
}

impl Verifier {
    #[must_use]
    pub fn new(totp_secret: Option<TotpSecret>, public_key: Option<RsaPublicKey>) -> Self {
        Self {
            totp_secret,
            public_key,
        }
    }

    /// Build a verifier from stored (Base32 / base64) credential material.
    /// Empty strings count as not configured.
    pub fn from_stored(
        totp_secret: Option<&str>,
        public_key: Option<&str>,
    ) -> Result<Self, KeyError> {
        let totp_secret = totp_secret
            .filter(|s| !s.trim().is_empty())
            .map(TotpSecret::from_base32)
            .transpose()?;
        let public_key = public_key
            .filter(|s| !s.trim().is_empty())
            .map(decode_public_key)
            .transpose()?;
        Ok(Self::new(totp_secret, public_key))
    }

    /// Verify `token` at the current time.
    #[must_use]
    pub fn verify(&self, token: &str) -> Verification {
        self.verify_at(token, totp::unix_now())
    }

    /// Verify `token` as if the clock read `unix_time`.
    ///
    /// A time-based code is accepted for the step containing `unix_time`
    /// and for the step before it.
    #[must_use]
    pub fn verify_at(&self, token: &str, unix_time: u64) -> Verification {
        let result = if is_totp_shaped(token) {
            self.check_totp(token, unix_time)
        } else {
            self.check_signed(token)
        };

        if let Err(reason) = result {
            log::debug!("credential rejected: {reason}");
        }
        result.into()
    }

    /// Verify the credential carried by an `Authorization` header.
    #[must_use]
    pub fn authorize(&self, header: Option<&str>) -> Verification {
        match header.and_then(token_from_authorization) {
            Some(token) => self.verify(token),
            None => Verification::Rejected(RejectReason::MalformedToken),
        }
    }

    fn check_totp(&self, token: &str, unix_time: u64) -> Result<(), RejectReason> {
        let secret = self
            .totp_secret
            .as_ref()
            .ok_or(RejectReason::NoCredentialConfigured)?;

        let current = totp::time_step(unix_time);
        let accepted = [Some(current), current.checked_sub(1)]
            .into_iter()
            .flatten()
            .any(|step| constant_time_eq(&totp::hotp(secret.as_bytes(), step), token));

        if accepted {
            Ok(())
        } else {
            Err(RejectReason::TotpMismatch)
        }
    }

    fn check_signed(&self, token: &str) -> Result<(), RejectReason> {
        signed::verify_token(token, self.public_key.as_ref())
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("totp", &self.totp_secret.is_some())
            .field("signature", &self.public_key.is_some())
            .finish()
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}
