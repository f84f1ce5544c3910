//! Base64 for HTTP Basic credentials.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Standard, padded base64 text.
///
/// `Debug` prints only the length, since the usual content is a credential.
///
/// ```rust
/// use bluesnap_types::util::Base64Text;
///
/// let token = Base64Text::basic_credentials("API_user", "secret");
/// assert_eq!(token.as_str(), "QVBJX3VzZXI6c2VjcmV0");
/// assert_eq!(token.decode().unwrap(), b"API_user:secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Base64Text(String);

impl Base64Text {
    pub fn encode(input: impl AsRef<[u8]>) -> Self {
        Self(STANDARD.encode(input))
    }

    /// `base64(username:password)`, the token of an `Authorization: Basic` header.
    pub fn basic_credentials(username: &str, password: &str) -> Self {
        Self::encode(format!("{username}:{password}"))
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Accepts only text that decodes.
impl FromStr for Base64Text {
    type Err = base64::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STANDARD.decode(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl Display for Base64Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for Base64Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Base64Text(<{} chars>)", self.0.len())
    }
}
