//! The payload contract shared by every payment method.
//!
//! A request payload knows how to encode itself ([`Serializable`]), a response
//! payload knows how to decode itself ([`Deserializable`]), and both report the
//! payment method they belong to ([`PaymentPayload`]). A [`PaymentMethod`] binds
//! one request type to one response type, so operations are checked at compile time
//! rather than by comparing tags at runtime.
//!
//! # Example
//!
//! ```rust
//! use bluesnap_types::card::Card;
//! use bluesnap_types::payload::{MethodKind, PaymentMethod};
//!
//! assert_eq!(Card::kind(), MethodKind::CARD);
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Display, Formatter};

/// Identifies the payment method a payload belongs to, e.g. `"card"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodKind(&'static str);

impl MethodKind {
    /// Card payments.
    pub const CARD: MethodKind = MethodKind("card");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Display for MethodKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Errors raised while encoding or decoding a payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("JSON error for {method} payload: {source}")]
    Json {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl PayloadError {
    pub fn json(method: &'static str, source: serde_json::Error) -> Self {
        Self::Json { method, source }
    }
}

/// A value that can be sent as a request body.
///
/// Kept object-safe so the transport can take `Option<&dyn Serializable>`.
pub trait Serializable {
    fn to_json(&self) -> Result<Vec<u8>, PayloadError>;
}

/// A value that can be built from a successful response body.
pub trait Deserializable: Sized {
    fn from_json(bytes: &[u8]) -> Result<Self, PayloadError>;
}

/// Tags a request or response payload with its payment method.
pub trait PaymentPayload {
    const METHOD: MethodKind;
}

/// Binds a request payload to its response payload.
///
/// The pairing is what makes a sale with a card request and, say, a wallet
/// response unrepresentable. The method tags are still compared before
/// dispatch, which catches an impl that pairs types from different methods.
pub trait PaymentMethod {
    type Request: Serializable + PaymentPayload;
    type Response: Deserializable + PaymentPayload;

    /// The method reported by the request side.
    fn kind() -> MethodKind {
        <Self::Request as PaymentPayload>::METHOD
    }
}

/// Encodes `value` with `serde_json`, tagging failures with `method`.
pub fn encode_json<T: Serialize + ?Sized>(
    method: MethodKind,
    value: &T,
) -> Result<Vec<u8>, PayloadError> {
    serde_json::to_vec(value).map_err(|e| PayloadError::json(method.as_str(), e))
}

/// Decodes `bytes` with `serde_json`, tagging failures with `method`.
pub fn decode_json<T: DeserializeOwned>(
    method: MethodKind,
    bytes: &[u8],
) -> Result<T, PayloadError> {
    serde_json::from_slice(bytes).map_err(|e| PayloadError::json(method.as_str(), e))
}

/// Response placeholder for calls whose body is not needed.
///
/// Decoding never fails and never looks at the bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoContent;

impl Deserializable for NoContent {
    fn from_json(_bytes: &[u8]) -> Result<Self, PayloadError> {
        Ok(NoContent)
    }
}
