//! Environment variable resolution for configuration values.
//!
//! Credentials rarely belong in a file checked into a repository. [`LiteralOrEnv`]
//! lets a configuration value be written either literally or as a reference to an
//! environment variable that is read while deserializing:
//!
//! ```json
//! {
//!   "baseUrl": "https://sandbox.bluesnap.com",
//!   "username": "$BLUESNAP_USERNAME",
//!   "password": "${BLUESNAP_PASSWORD}"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::str::FromStr;

/// A value given literally or as `$VAR` / `${VAR}`, resolved during deserialization.
///
/// Dereferences to the resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrEnv<T>(T);

impl<T> LiteralOrEnv<T> {
    pub fn from_literal(value: T) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Returns the variable name if `s` is written as `$VAR` or `${VAR}`.
fn env_reference(s: &str) -> Option<&str> {
    if let Some(braced) = s.strip_prefix("${").and_then(|r| r.strip_suffix('}')) {
        return (!braced.is_empty()).then_some(braced);
    }
    let name = s.strip_prefix('$')?;
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

/// Resolves `raw` to its final string, reading the environment when it is a reference.
fn resolve(raw: String) -> Result<String, String> {
    match env_reference(&raw) {
        Some(name) => std::env::var(name).map_err(|_| {
            format!("Environment variable '{name}' not found (referenced as '{raw}')")
        }),
        None => Ok(raw),
    }
}

impl<T> Deref for LiteralOrEnv<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de, T> Deserialize<'de> for LiteralOrEnv<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let value = resolve(raw).map_err(serde::de::Error::custom)?;
        value
            .parse::<T>()
            .map(LiteralOrEnv)
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse value: {e}")))
    }
}

impl<T: Serialize> Serialize for LiteralOrEnv<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_env_reference_syntax() {
        assert_eq!(env_reference("$BLUESNAP_USER"), Some("BLUESNAP_USER"));
        assert_eq!(env_reference("${BLUESNAP_USER}"), Some("BLUESNAP_USER"));
        assert_eq!(env_reference("$"), None);
        assert_eq!(env_reference("${}"), None);
        assert_eq!(env_reference("$not-a-var"), None);
        assert_eq!(env_reference("plain"), None);
    }

    #[test]
    fn test_literal_value() {
        let v: LiteralOrEnv<String> = serde_json::from_str("\"API_user\"").unwrap();
        assert_eq!(v.as_str(), "API_user");
        let url: LiteralOrEnv<Url> =
            serde_json::from_str("\"https://sandbox.bluesnap.com\"").unwrap();
        assert_eq!(url.host_str(), Some("sandbox.bluesnap.com"));
    }

    #[test]
    fn test_env_value() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("BLUESNAP_TYPES_TEST_SECRET", "s3cret") };
        let v: LiteralOrEnv<String> =
            serde_json::from_str("\"${BLUESNAP_TYPES_TEST_SECRET}\"").unwrap();
        assert_eq!(v.into_inner(), "s3cret");
    }

    #[test]
    fn test_missing_env_value() {
        let err = serde_json::from_str::<LiteralOrEnv<String>>("\"$BLUESNAP_TYPES_TEST_MISSING\"")
            .unwrap_err();
        assert!(err.to_string().contains("BLUESNAP_TYPES_TEST_MISSING"));
    }

    #[test]
    fn test_unparseable_value() {
        let err = serde_json::from_str::<LiteralOrEnv<Url>>("\"not a url\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse value"));
    }
}
