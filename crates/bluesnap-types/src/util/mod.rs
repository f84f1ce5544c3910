//! Utility types.
//!
//! - [`b64`] - Base64 for Basic credentials

pub mod b64;

pub use b64::Base64Text;
