//! The error envelope the gateway returns with failed calls.
//!
//! A status of 400 or above carries a body of the form
//!
//! ```json
//! {
//!   "message": [
//!     {
//!       "errorName": "INVALID_CARD_NUMBER",
//!       "code": "10001",
//!       "description": "Invalid card number",
//!       "invalidProperty": { "name": "cardNumber" }
//!     }
//!   ]
//! }
//! ```
//!
//! The status code is not part of the body; the connector stamps it after decoding.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::fmt::{Display, Formatter};

use crate::payload::{Deserializable, PayloadError};

/// One structured error reported by the gateway.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    #[serde(default)]
    pub error_name: String,
    /// Numeric error code. The gateway sends it as a number or a numeric string.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_property: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_events: Option<serde_json::Value>,
}

/// Errors returned by the gateway for one call, with the HTTP status that carried them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayErrors {
    #[serde(skip)]
    status_code: u16,
    #[serde(rename = "message", default)]
    messages: Vec<ErrorMessage>,
}

impl GatewayErrors {
    pub fn new(status_code: u16, messages: Vec<ErrorMessage>) -> Self {
        Self {
            status_code,
            messages,
        }
    }

    /// Returns a copy stamped with the status that produced it.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn messages(&self) -> &[ErrorMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ErrorMessage> {
        self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Looks up the first message with the given error name.
    pub fn find(&self, error_name: &str) -> Option<&ErrorMessage> {
        self.messages.iter().find(|m| m.error_name == error_name)
    }
}

impl Display for GatewayErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "gateway returned status {}", self.status_code)?;
        for (i, message) in self.messages.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(
                f,
                "{sep}{} ({}): {}",
                message.error_name, message.code, message.description
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for GatewayErrors {}

/// Decodes the envelope body. The status is left at zero for the caller to stamp.
impl Deserializable for GatewayErrors {
    fn from_json(bytes: &[u8]) -> Result<Self, PayloadError> {
        serde_json::from_slice(bytes).map_err(|e| PayloadError::json("error envelope", e))
    }
}
