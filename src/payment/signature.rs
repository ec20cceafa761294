//! Webhook signature scheme.
//!
//! The signature header has the form `t={unix_secs},v1={hex}[,v1={hex}...]`.
//! Each `v1` is an HMAC-SHA256 over `"{t}.{payload}"` keyed by the webhook
//! secret. A header verifies when any `v1` matches (compared in constant
//! time) and `t` lies within the tolerance of the current time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Reason a webhook signature was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// No signature header was supplied.
    #[error("Missing Stripe signature header")]
    Missing,

    /// The header does not follow the `t=..,v1=..` scheme.
    #[error("Malformed signature header: {0}")]
    Malformed(&'static str),

    /// The secret cannot key the MAC.
    #[error("Webhook secret cannot be used as a signing key")]
    InvalidSecret,

    /// No `v1` entry matches the expected signature.
    #[error("No signature matches the expected signature for the payload")]
    Mismatch,

    /// The signed timestamp is too far from the current time.
    #[error("Signature timestamp is {age_secs}s from now, outside the {tolerance_secs}s tolerance")]
    Stale {
        /// Distance between the signed timestamp and now
        age_secs: u64,
        /// Allowed distance
        tolerance_secs: u64,
    },
}

/// Parsed signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Signed timestamp, seconds since the Unix epoch
    pub timestamp: u64,
    /// Decoded `v1` signatures, in header order
    pub signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses `t=..,v1=..` entries.
    ///
    /// Entries with other keys (such as `v0`) and `v1` values that are not
    /// hex are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Missing`] for an empty header and
    /// [`SignatureError::Malformed`] when an entry has no `=`, the timestamp
    /// is absent or not a number, or no usable `v1` entry remains.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        if header.trim().is_empty() {
            return Err(SignatureError::Missing);
        }

        let mut timestamp = None;
        let mut signatures = Vec::new();
        for entry in header.split(',') {
            let (key, value) = entry
                .trim()
                .split_once('=')
                .ok_or(SignatureError::Malformed("entry without '='"))?;
            match key {
                "t" => {
                    let t = value
                        .parse::<u64>()
                        .map_err(|_| SignatureError::Malformed("timestamp is not a number"))?;
                    timestamp.get_or_insert(t);
                }
                "v1" => {
                    if let Ok(bytes) = hex::decode(value) {
                        signatures.push(bytes);
                    }
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::Malformed("no timestamp"))?;
        if signatures.is_empty() {
            return Err(SignatureError::Malformed("no v1 signature"));
        }
        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Computes the raw MAC of `payload` signed at `timestamp`.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidSecret`] if `secret` cannot key the MAC.
pub fn compute(secret: &[u8], timestamp: u64, payload: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Produces a signature header for `payload` signed at `timestamp`.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidSecret`] if `secret` cannot key the MAC.
pub fn sign(secret: &[u8], timestamp: u64, payload: &[u8]) -> Result<String, SignatureError> {
    let mac = compute(secret, timestamp, payload)?;
    Ok(format!("t={timestamp},v1={}", hex::encode(mac)))
}

/// Verifies `header` against `payload` at time `now_secs`.
///
/// # Errors
///
/// Returns the first reason the header is rejected: missing or malformed
/// header, no matching signature, then a timestamp outside `tolerance_secs`.
pub fn verify(
    secret: &[u8],
    payload: &[u8],
    header: &str,
    now_secs: u64,
    tolerance_secs: u64,
) -> Result<(), SignatureError> {
    let parsed = SignatureHeader::parse(header)?;
    let expected = compute(secret, parsed.timestamp, payload)?;

    let matched = parsed.signatures.iter().any(|candidate| {
        candidate.len() == expected.len() && bool::from(candidate.ct_eq(expected.as_slice()))
    });
    if !matched {
        return Err(SignatureError::Mismatch);
    }

    let age_secs = now_secs.abs_diff(parsed.timestamp);
    if age_secs > tolerance_secs {
        return Err(SignatureError::Stale {
            age_secs,
            tolerance_secs,
        });
    }
    Ok(())
}
