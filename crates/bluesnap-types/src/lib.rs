#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the BlueSnap Payment API client.
//!
//! This crate holds everything that describes what travels over the wire,
//! independent of how it is sent. The HTTP side lives in the `bluesnap-rs` crate.
//!
//! # Modules
//!
//! - [`payload`] - The payload contract: [`Serializable`](payload::Serializable),
//!   [`Deserializable`](payload::Deserializable) and the compile-time
//!   [`PaymentMethod`](payload::PaymentMethod) pairing
//! - [`card`] - The `card` payment method and its request/response schema
//! - [`errors`] - The error envelope returned by the gateway on failed calls
//! - [`outcome`] - [`Outcome`](outcome::Outcome), success or decline as a value
//! - [`config`] - Environment variable resolution for configuration values
//! - [`util`] - Helper types (base64)
//!
//! # Payment methods
//!
//! Each payment method is a marker type implementing [`PaymentMethod`](payload::PaymentMethod),
//! binding one request type to one response type. Only [`card::Card`] ships today.

pub mod card;
pub mod config;
pub mod errors;
pub mod outcome;
pub mod payload;
pub mod util;

/// Version of the Payment API (`/services/{API_VERSION}/...`) that the schemas target.
///
/// A change to the card schema that is not additive belongs with a new version.
pub const API_VERSION: &str = "2";

pub use errors::{ErrorMessage, GatewayErrors};
pub use outcome::Outcome;
pub use payload::{
    Deserializable, MethodKind, NoContent, PayloadError, PaymentMethod, PaymentPayload,
    Serializable,
};
