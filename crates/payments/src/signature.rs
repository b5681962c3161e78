//! Webhook signature verification.
//!
//! The processor sends `Stripe-Signature: t=<unix>,v1=<hex>[,v1=<hex>...]`.
//! Each `v1` value is `hex(HMAC-SHA256(secret, "{t}.{raw body}"))`. A
//! request is authentic if any `v1` matches and `t` is within the tolerance
//! window of the current time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default replay window in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Signature header is malformed")]
    MalformedHeader,

    #[error("Signature header contains no v1 signatures")]
    NoSignatures,

    #[error("Signature timestamp is outside the tolerance window")]
    TimestampOutsideTolerance,

    #[error("No signature matches the payload")]
    Mismatch,
}

fn keyed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Hex signature of `payload` at `timestamp`.
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    hex::encode(keyed_mac(secret, timestamp, payload).finalize().into_bytes())
}

/// Build a complete header value. Used by tests and local tooling.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!("t={timestamp},v1={}", compute_signature(secret, timestamp, payload))
}

/// Verify `header` against the raw request body.
///
/// Returns the signed timestamp on success. Comparison is constant-time.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now_unix: i64,
    tolerance_secs: i64,
) -> Result<i64, SignatureError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let (key, value) = part
            .trim()
            .split_once('=')
            .ok_or(SignatureError::MalformedHeader)?;
        match key {
            "t" => {
                let t = value
                    .parse::<i64>()
                    .map_err(|_| SignatureError::MalformedHeader)?;
                timestamp = Some(t);
            }
            "v1" => {
                // Undecodable entries can never match; skip them.
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(SignatureError::NoSignatures);
    }
    let within_tolerance = now_unix
        .checked_sub(timestamp)
        .map(i64::unsigned_abs)
        .is_some_and(|skew| skew <= tolerance_secs.unsigned_abs());
    if !within_tolerance {
        return Err(SignatureError::TimestampOutsideTolerance);
    }

    let matched = signatures
        .iter()
        .any(|sig| keyed_mac(secret, timestamp, payload).verify_slice(sig).is_ok());
    if matched {
        Ok(timestamp)
    } else {
        Err(SignatureError::Mismatch)
    }
}
