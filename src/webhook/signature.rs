//! Shared-secret signatures for webhook bodies
//!
//! The sender puts a hex HMAC-SHA256 of the raw request body in a header, optionally
//! prefixed with `sha256=`. Comparison goes through `Mac::verify_slice`, which is
//! constant time.

use actix_web::http::header::HeaderName;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Vec<u8>,
    header_name: HeaderName,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("header_name", &self.header_name)
            .finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    /// # Errors
    ///
    /// Returns an error if `header_name` is not a valid HTTP header name
    pub fn new(secret: &str, header_name: &str) -> Result<Self, WebhookError> {
        let header_name = HeaderName::from_bytes(header_name.trim().as_bytes())
            .map_err(|_| WebhookError::InvalidHeaderName(header_name.to_string()))?;
        Ok(Self {
            secret: secret.as_bytes().to_vec(),
            header_name,
        })
    }

    #[must_use]
    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    fn mac(&self) -> Result<HmacSha256, WebhookError> {
        <HmacSha256 as Mac>::new_from_slice(&self.secret).map_err(|_| WebhookError::InvalidSecret)
    }

    /// Hex signature for a body, in the form senders are expected to send
    ///
    /// # Errors
    ///
    /// Returns an error if the secret cannot key the HMAC
    pub fn sign(&self, body: &[u8]) -> Result<String, WebhookError> {
        let mut mac = self.mac()?;
        mac.update(body);
        Ok(format!(
            "{SIGNATURE_PREFIX}{}",
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    /// Check the signature header value against the body
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing, is not hex, or does not match
    pub fn verify(&self, provided: Option<&str>, body: &[u8]) -> Result<(), WebhookError> {
        let provided = provided
            .ok_or_else(|| WebhookError::MissingSignature(self.header_name.as_str().to_string()))?;
        let provided = provided.trim();
        let encoded = provided
            .strip_prefix(SIGNATURE_PREFIX)
            .unwrap_or(provided);
        let expected = hex::decode(encoded)
            .map_err(|e| WebhookError::MalformedSignature(e.to_string()))?;

        let mut mac = self.mac()?;
        mac.update(body);
        mac.verify_slice(&expected)
            .map_err(|_| WebhookError::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"foo":"bar"}"#;

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new("apify-shared-secret", "X-Apify-Signature").unwrap()
    }

    #[test]
    fn test_sign_then_verify() {
        let signature = verifier().sign(BODY).unwrap();
        assert!(signature.starts_with("sha256="));
        assert_eq!(signature.len(), "sha256=".len() + 64);
        assert!(verifier().verify(Some(&signature), BODY).is_ok());
    }

    #[test]
    fn test_prefix_is_optional() {
        let signature = verifier().sign(BODY).unwrap();
        let bare = signature.trim_start_matches("sha256=");
        assert!(verifier().verify(Some(bare), BODY).is_ok());
    }

    #[test]
    fn test_missing_signature() {
        let err = verifier().verify(None, BODY).unwrap_err();
        assert!(matches!(err, WebhookError::MissingSignature(ref h) if h == "x-apify-signature"));
        assert!(err.is_authentication_failure());
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let signature = verifier().sign(BODY).unwrap();
        let err = verifier()
            .verify(Some(&signature), br#"{"foo":"baz"}"#)
            .unwrap_err();
        assert!(matches!(err, WebhookError::SignatureMismatch));
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let signature = SignatureVerifier::new("other", "X-Apify-Signature")
            .unwrap()
            .sign(BODY)
            .unwrap();
        assert!(matches!(
            verifier().verify(Some(&signature), BODY),
            Err(WebhookError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_non_hex_signature() {
        assert!(matches!(
            verifier().verify(Some("sha256=not-hex"), BODY),
            Err(WebhookError::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_header_name_is_validated() {
        for name in ["", "X Apify Signature", "X-Apify-Signature:", "Sig\u{e9}"] {
            assert!(
                matches!(
                    SignatureVerifier::new("secret", name),
                    Err(WebhookError::InvalidHeaderName(_))
                ),
                "{name:?}"
            );
        }
        let verifier = SignatureVerifier::new("secret", " X-Custom-Signature ").unwrap();
        assert_eq!(verifier.header_name().as_str(), "x-custom-signature");
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", verifier());
        assert!(!rendered.contains("apify-shared-secret"));
    }
}
