//! Interaction request signatures
//!
//! Each request carries an Ed25519 signature over `timestamp || body`,
//! hex-encoded in `X-Signature-Ed25519`, with the timestamp in
//! `X-Signature-Timestamp`.

use axum::http::HeaderMap;
use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Signature verification errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    #[error("malformed signature")]
    MalformedSignature,

    #[error("bad signature")]
    BadSignature,
}

/// Verifies requests against the application public key
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Build from the hex public key shown in the developer portal
    pub fn from_hex(public_key: &str) -> Result<Self, VerifyError> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|e| VerifyError::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            VerifyError::InvalidPublicKey(format!("expected 32 bytes, got {}", b.len()))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| VerifyError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { key })
    }

    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Check a hex signature over `timestamp || body`
    pub fn verify(&self, signature_hex: &str, timestamp: &str, body: &[u8]) -> Result<(), VerifyError> {
        let sig_bytes = hex::decode(signature_hex).map_err(|_| VerifyError::MalformedSignature)?;
        let signature =
            Signature::from_slice(&sig_bytes).map_err(|_| VerifyError::MalformedSignature)?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify_strict(&message, &signature)
            .map_err(|_| VerifyError::BadSignature)
    }

    /// Pull the signature headers out of a request and verify
    pub fn verify_request(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), VerifyError> {
        let signature = header_str(headers, SIGNATURE_HEADER)?;
        let timestamp = header_str(headers, TIMESTAMP_HEADER)?;
        self.verify(signature, timestamp, body)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, VerifyError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(VerifyError::MissingHeader(name))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::from_hex(&hex::encode(signing_key().verifying_key().to_bytes())).unwrap()
    }

    fn sign(timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(signing_key().sign(&message).to_bytes())
    }

    #[test]
    fn test_valid_signature() {
        let body = br#"{"type":1}"#;
        let sig = sign("1700000000", body);
        assert_eq!(verifier().verify(&sig, "1700000000", body), Ok(()));
    }

    #[test]
    fn test_tampered_body() {
        let sig = sign("1700000000", br#"{"type":1}"#);
        assert_eq!(
            verifier().verify(&sig, "1700000000", br#"{"type":2}"#),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_timestamp() {
        let body = br#"{"type":1}"#;
        let sig = sign("1700000000", body);
        assert_eq!(
            verifier().verify(&sig, "1700000001", body),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn test_malformed_signature() {
        assert_eq!(
            verifier().verify("not-hex", "1", b"{}"),
            Err(VerifyError::MalformedSignature)
        );
        assert_eq!(
            verifier().verify("abcd", "1", b"{}"),
            Err(VerifyError::MalformedSignature)
        );
    }

    #[test]
    fn test_invalid_public_key() {
        assert!(matches!(
            SignatureVerifier::from_hex("zz"),
            Err(VerifyError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            SignatureVerifier::from_hex("abcd"),
            Err(VerifyError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_verify_request_headers() {
        let body = br#"{"type":1}"#;
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&sign("42", body)).unwrap());

        assert_eq!(
            verifier().verify_request(&headers, body),
            Err(VerifyError::MissingHeader(TIMESTAMP_HEADER))
        );

        headers.insert(TIMESTAMP_HEADER, HeaderValue::from_static("42"));
        assert_eq!(verifier().verify_request(&headers, body), Ok(()));
    }
}
