//! HTTP message signing for beacon requests.
//!
//! Requests carry a draft-cavage style signature in the `Authorization`
//! header, computed with RSA-SHA256 over the `date` and `x-beacon-user`
//! headers. The verifying side is included so key pairs can be checked
//! against the exact header format the client emits.

use crate::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// Signature algorithm label sent in the `Authorization` header.
pub const SIGNATURE_ALGORITHM: &str = "rsa-sha256";

/// Headers covered by the signature, in signing order.
pub const SIGNED_HEADERS: [&str; 2] = ["date", "x-beacon-user"];

/// Name of the header carrying the requesting user.
pub const X_BEACON_USER: &str = "x-beacon-user";

/// Signs requests with a private key under a caller-chosen key identifier.
pub struct RequestSigner {
    key_id: String,
    signing_key: SigningKey<Sha256>,
}

impl RequestSigner {
    pub fn new(key: RsaPrivateKey, key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            signing_key: SigningKey::<Sha256>::new(key),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Sign the covered headers, returning the base64 signature.
    pub fn sign(&self, date: &str, user: &str) -> String {
        let message = signing_string(date, user);
        let signature = self.signing_key.sign(message.as_bytes());
        STANDARD.encode(signature.to_bytes())
    }

    /// Full value for the `Authorization` header.
    pub fn authorization_header(&self, date: &str, user: &str) -> String {
        format!(
            "Signature keyId=\"{}\",algorithm=\"{}\",headers=\"{}\",signature=\"{}\"",
            self.key_id,
            SIGNATURE_ALGORITHM,
            SIGNED_HEADERS.join(" "),
            self.sign(date, user),
        )
    }
}

/// Canonical string the signature is computed over.
///
/// One `name: value` line per covered header, in [`SIGNED_HEADERS`] order.
fn signing_string(date: &str, user: &str) -> String {
    format!("date: {}\nx-beacon-user: {}", date, user)
}

/// Current time formatted for the `Date` header.
pub fn http_date() -> String {
    format_http_date(Utc::now())
}

/// RFC 7231 IMF-fixdate, e.g. `Fri, 07 Aug 2026 10:30:00 GMT`.
pub fn format_http_date(when: DateTime<Utc>) -> String {
    when.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Verify a base64 signature over the covered headers.
pub fn verify_signature(key: &RsaPublicKey, date: &str, user: &str, signature: &str) -> Result<()> {
    let raw = STANDARD
        .decode(signature)
        .map_err(|e| Error::Signature(format!("base64: {}", e)))?;
    let signature = Signature::try_from(raw.as_slice())
        .map_err(|e| Error::Signature(format!("malformed signature: {}", e)))?;

    let message = signing_string(date, user);
    VerifyingKey::<Sha256>::new(key.clone())
        .verify(message.as_bytes(), &signature)
        .map_err(|e| Error::Signature(format!("verification failed: {}", e)))
}

/// Parsed fields of an `Authorization: Signature ...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParams {
    pub key_id: String,
    pub algorithm: String,
    pub headers: Vec<String>,
    pub signature: String,
}

/// Parse an `Authorization` header produced by [`RequestSigner`].
pub fn parse_authorization(header: &str) -> Result<SignatureParams> {
    let params = header
        .strip_prefix("Signature ")
        .ok_or_else(|| Error::Signature("missing Signature prefix".to_string()))?;

    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut signature = None;

    for part in params.split(',') {
        let (name, value) = part
            .split_once('=')
            .ok_or_else(|| Error::Signature(format!("malformed parameter: {:?}", part)))?;
        let value = value.trim_matches('"').to_string();

        match name.trim() {
            "keyId" => key_id = Some(value),
            "algorithm" => algorithm = Some(value),
            "headers" => {
                headers = Some(value.split_whitespace().map(str::to_string).collect());
            }
            "signature" => signature = Some(value),
            _ => {}
        }
    }

    Ok(SignatureParams {
        key_id: key_id.ok_or_else(|| Error::Signature("missing keyId".to_string()))?,
        algorithm: algorithm.ok_or_else(|| Error::Signature("missing algorithm".to_string()))?,
        headers: headers.ok_or_else(|| Error::Signature("missing headers".to_string()))?,
        signature: signature.ok_or_else(|| Error::Signature("missing signature".to_string()))?,
    })
}
