//! Request signing with HMAC-SHA256.
//!
//! A signature covers the string `timestamp={timestamp}&nonce={nonce}`, where the
//! timestamp is in milliseconds and the nonce is random hex. The server recomputes
//! it with the shared secret and compares in constant time.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use url::form_urlencoded;

use crate::config::SIGNATURE_NONCE_LEN;
use crate::error_handling::{Result, UtilError};
use crate::rate_limit::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

/// The triple sent alongside a signed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureParams {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Random lowercase hex.
    pub nonce: String,
    /// Lowercase hex HMAC-SHA256, 64 characters.
    pub signature: String,
}

impl SignatureParams {
    /// Renders `timestamp=..&nonce=..&signature=..`, form-encoded.
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("timestamp", &self.timestamp.to_string())
            .append_pair("nonce", &self.nonce)
            .append_pair("signature", &self.signature)
            .finish()
    }
}

/// `size` random lowercase hex characters.
pub fn gen_ran_hex(size: usize) -> String {
    let mut rng = rand::rng();
    (0..size)
        .map(|_| {
            let digit = rng.random_range(0..16u32);
            char::from_digit(digit, 16).unwrap_or('0')
        })
        .collect()
}

/// Lowercase hex encoding of `bytes`.
pub fn buffer_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

fn mac_for(key: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(key).map_err(|e| UtilError::InvalidKey(e.to_string()))
}

/// HMAC-SHA256 of `message` under `key`, hex encoded.
///
/// ```
/// use jmni_until::signature::hmac_sha256_hex;
///
/// let mac = hmac_sha256_hex(b"key", b"The quick brown fox jumps over the lazy dog").unwrap();
/// assert_eq!(mac, "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8");
/// ```
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> Result<String> {
    let mut mac = mac_for(key)?;
    mac.update(message);
    Ok(buffer_to_hex(&mac.finalize().into_bytes()))
}

fn string_to_sign(timestamp: i64, nonce: &str) -> String {
    format!("timestamp={}&nonce={}", timestamp, nonce)
}

/// Signs a given timestamp and nonce.
pub fn sign(secret: &str, timestamp: i64, nonce: &str) -> Result<String> {
    hmac_sha256_hex(secret.as_bytes(), string_to_sign(timestamp, nonce).as_bytes())
}

/// Generates a fresh signature triple at the current time.
pub fn generate_signature(secret: &str) -> Result<SignatureParams> {
    generate_signature_with(secret, &SystemClock)
}

/// Generates a signature triple using `clock` for the timestamp.
pub fn generate_signature_with(secret: &str, clock: &dyn Clock) -> Result<SignatureParams> {
    let timestamp = i64::try_from(clock.now_ms()).unwrap_or(i64::MAX);
    let nonce = gen_ran_hex(SIGNATURE_NONCE_LEN);
    let signature = sign(secret, timestamp, &nonce)?;
    log::debug!("signed timestamp={} nonce={}", timestamp, nonce);
    Ok(SignatureParams {
        timestamp,
        nonce,
        signature,
    })
}

/// Checks a signature triple against `secret` in constant time.
///
/// A signature that is not valid hex is rejected.
pub fn verify_signature(secret: &str, params: &SignatureParams) -> bool {
    let Ok(expected) = hex::decode(&params.signature) else {
        log::warn!("signature is not hex: {:?}", params.signature);
        return false;
    };
    let Ok(mut mac) = mac_for(secret.as_bytes()) else {
        return false;
    };
    mac.update(string_to_sign(params.timestamp, &params.nonce).as_bytes());
    mac.verify_slice(&expected).is_ok()
}
