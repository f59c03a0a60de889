//! Signed-challenge tokens: `base64(data) "." base64(signature)`.
//!
//! The signature is RSASSA-PKCS1-v1_5 with SHA-256 over the decoded data.
//! The data itself carries no claims and no nonce or timestamp, so a
//! captured token stays valid for as long as the key does.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier as _};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::verifier::RejectReason;

pub const SEGMENT_SEPARATOR: char = '.';

/// Sign `plaintext` and return the wire token.
#[must_use]
pub fn sign_challenge(private_key: &RsaPrivateKey, plaintext: &[u8]) -> String {
    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key.sign(plaintext);
    format!(
        "{}{}{}",
        STANDARD.encode(plaintext),
        SEGMENT_SEPARATOR,
        STANDARD.encode(signature.to_bytes())
    )
}

/// Split and decode a signed token into `(plaintext, signature)`.
pub(crate) fn decode_token(token: &str) -> Result<(Vec<u8>, Vec<u8>), RejectReason> {
    let mut segments = token.split(SEGMENT_SEPARATOR);
    let (Some(data), Some(signature), None) = (segments.next(), segments.next(), segments.next())
    else {
        return Err(RejectReason::MalformedToken);
    };

    let plaintext = STANDARD
        .decode(data)
        .map_err(|_| RejectReason::MalformedToken)?;
    let signature = STANDARD
        .decode(signature)
        .map_err(|_| RejectReason::MalformedToken)?;

    Ok((plaintext, signature))
}

/// Check a signed token against `public_key`.
///
/// The token's shape is checked before the key, so a malformed token is
/// `MalformedToken` whether or not a key is configured.
pub(crate) fn verify_token(
    token: &str,
    public_key: Option<&RsaPublicKey>,
) -> Result<(), RejectReason> {
    let (plaintext, signature) = decode_token(token)?;
    let public_key = public_key.ok_or(RejectReason::NoCredentialConfigured)?;

    let signature =
        Signature::try_from(signature.as_slice()).map_err(|_| RejectReason::SignatureInvalid)?;
    VerifyingKey::<Sha256>::new(public_key.clone())
        .verify(&plaintext, &signature)
        .map_err(|_| RejectReason::SignatureInvalid)
}
