//! Per-call options: the merchant API credentials.
//!
//! Options are passed to every operation instead of living on the
//! [`Connector`](crate::connector::Connector), so one connector can serve several
//! merchant accounts, and credentials can rotate without rebuilding it.

use bluesnap_types::util::Base64Text;
use http::HeaderValue;
use http::header::InvalidHeaderValue;
use std::fmt::{Debug, Formatter};

/// API username and password, sent as HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The `Authorization` header value: `Basic base64(username:password)`.
    ///
    /// The value is marked sensitive, so `http` and `reqwest` keep it out of their debug output.
    ///
    /// # Errors
    ///
    /// Fails only if the encoded value is not a valid header, which base64 output never is.
    pub fn authorization_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let token = Base64Text::basic_credentials(&self.username, &self.password);
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Options for one operation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub credentials: Credentials,
}

impl Options {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl From<Credentials> for Options {
    fn from(credentials: Credentials) -> Self {
        Self::new(credentials)
    }
}
