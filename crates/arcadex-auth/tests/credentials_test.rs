//! End-to-end tests: provision secrets, mint tokens the way a client does,
//! and check them with a verifier built from the stored form.

use std::sync::OnceLock;

use arcadex_auth::material::decode_private_key;
use arcadex_auth::{
    current_totp, sign_challenge, totp_code, ProvisionedSecrets, RejectReason, TotpSecret,
    Verification, Verifier,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// RSA generation is slow in debug builds; share one set per test binary.
fn secrets() -> &'static ProvisionedSecrets {
    static SECRETS: OnceLock<ProvisionedSecrets> = OnceLock::new();
    SECRETS.get_or_init(|| ProvisionedSecrets::generate().unwrap())
}

fn verifier() -> Verifier {
    let s = secrets();
    Verifier::from_stored(Some(&s.totp_secret), Some(&s.rsa_public_key)).unwrap()
}

fn signed_token(plaintext: &[u8]) -> String {
    let private_key = decode_private_key(&secrets().rsa_private_key).unwrap();
    sign_challenge(&private_key, plaintext)
}

fn flip_bit(bytes: &mut [u8], bit: usize) {
    bytes[bit / 8] ^= 1 << (bit % 8);
}

#[test]
fn test_totp_from_provisioned_secret_is_accepted() {
    let secret = TotpSecret::from_base32(&secrets().totp_secret).unwrap();
    let token = current_totp(&secret);

    assert_eq!(token.len(), 6);
    assert_eq!(verifier().verify(&token), Verification::Accepted);
}

#[test]
fn test_totp_window() {
    let secret = TotpSecret::from_base32(&secrets().totp_secret).unwrap();
    let now = 1_800_000_000;
    let v = verifier();

    assert!(v.verify_at(&totp_code(&secret, now), now).is_accepted());
    assert!(v.verify_at(&totp_code(&secret, now - 30), now).is_accepted());

    let stale = totp_code(&secret, now - 60);
    // A stale code may collide with a valid one by chance (1 in 10^6).
    if stale != totp_code(&secret, now) && stale != totp_code(&secret, now - 30) {
        assert_eq!(
            v.verify_at(&stale, now),
            Verification::Rejected(RejectReason::TotpMismatch)
        );
    }
}

#[test]
fn test_signed_challenge_is_accepted() {
    let token = signed_token(b"test data");
    assert_eq!(verifier().verify(&token), Verification::Accepted);
}

#[test]
fn test_signed_challenge_wire_format() {
    let token = signed_token(b"test data");
    let (data, signature) = token.split_once('.').unwrap();

    assert_eq!(data, "dGVzdCBkYXRh");
    assert!(!signature.contains('.'));
    // 2048-bit signature = 256 bytes = 344 base64 characters with padding
    assert_eq!(STANDARD.decode(signature).unwrap().len(), 256);
}

#[test]
fn test_signed_challenge_via_bearer_header() {
    let header = format!("Bearer {}", signed_token(b"challenge"));
    assert!(verifier().authorize(Some(&header)).is_accepted());
}

#[test]
fn test_mutated_plaintext_is_rejected() {
    let plaintext = b"import batch 42".to_vec();
    let token = signed_token(&plaintext);
    let (_, signature) = token.split_once('.').unwrap();

    for bit in [0, 7, 33, plaintext.len() * 8 - 1] {
        let mut mutated = plaintext.clone();
        flip_bit(&mut mutated, bit);
        let forged = format!("{}.{}", STANDARD.encode(&mutated), signature);
        assert_eq!(
            verifier().verify(&forged),
            Verification::Rejected(RejectReason::SignatureInvalid),
            "bit {bit}"
        );
    }
}

#[test]
fn test_mutated_signature_is_rejected() {
    let token = signed_token(b"import batch 42");
    let (data, signature) = token.split_once('.').unwrap();
    let signature = STANDARD.decode(signature).unwrap();

    for bit in [0, 8, 1000, signature.len() * 8 - 1] {
        let mut mutated = signature.clone();
        flip_bit(&mut mutated, bit);
        let forged = format!("{}.{}", data, STANDARD.encode(&mutated));
        assert_eq!(
            verifier().verify(&forged),
            Verification::Rejected(RejectReason::SignatureInvalid),
            "bit {bit}"
        );
    }
}

#[test]
fn test_signature_from_other_key_is_rejected() {
    let other = ProvisionedSecrets::generate().unwrap();
    let other_key = decode_private_key(&other.rsa_private_key).unwrap();
    let token = sign_challenge(&other_key, b"test data");

    assert_eq!(
        verifier().verify(&token),
        Verification::Rejected(RejectReason::SignatureInvalid)
    );
}

#[test]
fn test_malformed_tokens_are_rejected_not_panics() {
    let v = verifier();
    let valid = signed_token(b"x");
    let (data, signature) = valid.split_once('.').unwrap();

    let cases = [
        String::new(),
        "12345".to_string(),
        "no-separator-here".to_string(),
        format!("{data}{signature}"),
        format!("{data}.{signature}.{data}"),
        format!("!!!.{signature}"),
        format!("{data}.***"),
        format!("{data}.{}", signature.trim_end_matches('=')),
    ];

    for token in &cases {
        assert_eq!(
            v.verify(token),
            Verification::Rejected(RejectReason::MalformedToken),
            "token {token:?}"
        );
    }
}
