//! Opaque DNS wire-format message carried between the client and upstreams.
//!
//! The bytes are never parsed. They are buffered once per request and the
//! same `Bytes` handle is resent to every provider of a fallback sweep.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use bytes::Bytes;
use std::borrow::Cow;

use crate::DomainError;

/// Maximum DNS message size accepted on the POST path (RFC 8484 §6).
pub const MAX_DNS_MESSAGE_BYTES: usize = 65_535;

/// URL-safe alphabet, padded or unpadded input.
const BASE64URL_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    bytes: Bytes,
}

impl DnsMessage {
    /// Wrap a fully buffered POST body. Empty bodies pass through.
    pub fn from_body(body: Bytes) -> Result<Self, DomainError> {
        if body.len() > MAX_DNS_MESSAGE_BYTES {
            return Err(DomainError::InvalidQuery(format!(
                "message of {} bytes exceeds {} byte limit",
                body.len(),
                MAX_DNS_MESSAGE_BYTES
            )));
        }
        Ok(Self { bytes: body })
    }

    /// Decode the `dns` parameter of a GET query.
    ///
    /// Accepts padded and unpadded input; `+` and `/` from the standard
    /// alphabet are read as their URL-safe counterparts. `encoded` must be
    /// the already form-decoded parameter value, so over a GET query string
    /// a standard-alphabet `+` only survives when sent as `%2B`.
    pub fn from_base64url(encoded: &str) -> Result<Self, DomainError> {
        let normalized: Cow<'_, str> = if encoded.contains(['+', '/']) {
            Cow::Owned(encoded.replace('+', "-").replace('/', "_"))
        } else {
            Cow::Borrowed(encoded)
        };

        let decoded = BASE64URL_LENIENT
            .decode(normalized.as_bytes())
            .map_err(|e| DomainError::InvalidQuery(e.to_string()))?;

        if decoded.is_empty() {
            return Err(DomainError::InvalidQuery("empty dns parameter".into()));
        }

        Self::from_body(Bytes::from(decoded))
    }

    pub fn to_base64url(&self) -> String {
        BASE64URL_LENIENT.encode(&self.bytes)
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
