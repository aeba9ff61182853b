//! Request signing for private BingX endpoints.
//!
//! Parameters are sorted by key and form-encoded; the resulting query string
//! is signed with HMAC-SHA256 keyed by the API secret and the hex digest is
//! sent as the `signature` parameter.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use crate::error::{BingxError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Build the canonical query string: keys sorted, values form-encoded.
pub fn canonical_query(params: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in sorted {
        ser.append_pair(k, v);
    }
    ser.finish()
}

/// Hex-encoded HMAC-SHA256 of `payload` keyed by `secret`.
pub fn sign_payload(payload: &str, secret: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BingxError::Signing(format!("HMAC key error: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Append `timestamp`, canonicalize and sign. Returns the full query string
/// including the trailing `signature=` pair.
pub fn signed_query(params: &[(&str, String)], timestamp_ms: i64, secret: &str) -> Result<String> {
    let mut all: Vec<(&str, String)> = params.to_vec();
    all.push(("timestamp", timestamp_ms.to_string()));
    let query = canonical_query(&all);
    let signature = sign_payload(&query, secret)?;
    Ok(format!("{query}&signature={signature}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_query_sorts_keys() {
        let q = canonical_query(&[
            ("symbol", "BTC-USDT".into()),
            ("leverage", "20".into()),
            ("side", "LONG".into()),
        ]);
        assert_eq!(q, "leverage=20&side=LONG&symbol=BTC-USDT");
    }

    #[test]
    fn test_canonical_query_empty() {
        assert_eq!(canonical_query(&[]), "");
    }

    #[test]
    fn test_signed_query_places_timestamp_in_order() {
        let q = signed_query(
            &[("symbol", "ETH-USDT".into()), ("side", "LONG".into())],
            1_700_000_000_000,
            "secret",
        )
        .unwrap();
        assert!(q.starts_with("side=LONG&symbol=ETH-USDT&timestamp=1700000000000&signature="));
        let sig = q.rsplit("signature=").next().unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
