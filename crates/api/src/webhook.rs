//! Webhook signature verification.
//!
//! The billing collaborator signs every webhook body with HMAC-SHA256
//! over the raw bytes, hex-encoded in the `X-Tavolo-Signature` header.
//! Verification is constant-time via the `hmac` crate.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded body signature.
pub const SIGNATURE_HEADER: &str = "x-tavolo-signature";

/// Compute the hex-encoded HMAC-SHA256 signature of a body.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    let digest = mac.finalize().into_bytes();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

/// Verify a hex-encoded signature against the body.
///
/// Returns `false` for malformed hex as well as mismatched digests.
pub fn verify(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Some(signature) = decode_hex(signature_hex) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let signature = sign("secret", b"{\"plan\":\"monthly\"}");
        assert!(verify("secret", b"{\"plan\":\"monthly\"}", &signature));
    }

    #[test]
    fn rejects_tampered_body() {
        let signature = sign("secret", b"original");
        assert!(!verify("secret", b"tampered", &signature));
    }

    #[test]
    fn rejects_wrong_secret() {
        let signature = sign("secret-a", b"body");
        assert!(!verify("secret-b", b"body", &signature));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(!verify("secret", b"body", "not-hex"));
        assert!(!verify("secret", b"body", "abc"));
    }

    #[test]
    fn signature_is_hex_sha256_length() {
        let signature = sign("secret", b"body");
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
