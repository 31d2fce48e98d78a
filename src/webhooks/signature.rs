//! Webhook signature verification.
//!
//! The tracker signs each delivery with HMAC-SHA256 over the raw body using a
//! shared secret and sends the result as `X-Hub-Signature-256: sha256=<hex>`.
//! Deliveries are verified before their payload is parsed.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// The shared secret webhook deliveries are signed with.
#[derive(Clone)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        WebhookSecret(secret.into())
    }

    /// Produces the `X-Hub-Signature-256` header value for `payload`.
    ///
    /// ```
    /// use triage_bot::webhooks::WebhookSecret;
    ///
    /// let secret = WebhookSecret::new("It's a Secret to Everybody");
    /// let header = secret.sign(b"Hello, World!");
    ///
    /// assert!(header.starts_with("sha256="));
    /// assert!(secret.verify(b"Hello, World!", &header));
    /// assert!(!secret.verify(b"Hello, World?", &header));
    /// ```
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.0).expect("HMAC can take key of any size");
        mac.update(payload);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    /// Checks `header` against the signature of `payload`.
    ///
    /// Malformed headers are rejected, never a panic. The comparison is
    /// constant-time.
    pub fn verify(&self, payload: &[u8], header: &str) -> bool {
        let Some(expected) = parse_signature_header(header) else {
            return false;
        };

        let mut mac = match HmacSha256::new_from_slice(&self.0) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(payload);
        mac.verify_slice(&expected).is_ok()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

/// Decodes `sha256=<hex>` into raw bytes.
///
/// Returns `None` for a missing prefix, another algorithm, or invalid hex.
///
/// ```
/// use triage_bot::webhooks::parse_signature_header;
///
/// assert_eq!(parse_signature_header("sha256=1234abcd"), Some(vec![0x12, 0x34, 0xab, 0xcd]));
/// assert!(parse_signature_header("sha1=1234abcd").is_none());
/// assert!(parse_signature_header("sha256=xyz").is_none());
/// ```
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha256=")?;
    hex::decode(hex_sig).ok()
}
