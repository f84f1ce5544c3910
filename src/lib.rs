//! Rust client for the [BlueSnap Payment API](https://developers.bluesnap.com/v8976-JSON/docs).
//!
//! The crate sends authenticated JSON calls for card transactions (sale, auth, capture,
//! auth reversal) and reads transactions back. Every call returns one of three things:
//!
//! - `Ok(Outcome::Success(response))`: the gateway accepted the call,
//! - `Ok(Outcome::Declined(errors))`: the gateway answered with status 400 or above
//!   and its error envelope,
//! - `Err(ConnectorError)`: the call could not be made or its answer could not be read.
//!
//! # Modules
//!
//! - [`connector`] - [`Connector`](connector::Connector) and the generic `execute` exchange
//! - [`operations`] - Sale, auth, capture, auth reversal and retrieve
//! - [`options`] - Per-call credentials
//! - [`transport`] - The [`HttpTransport`](transport::HttpTransport) seam, implemented for `reqwest::Client`
//! - [`config`] - JSON configuration with environment variable references
//! - [`types`] - Wire types, re-exported from `bluesnap-types`
//!
//! # Logging
//!
//! With the `telemetry` feature (on by default), calls are traced with `tracing` under
//! the `bluesnap.connector.execute` span. Request and response bodies are never logged.
//! The crate installs no subscriber.

pub mod config;
pub mod connector;
pub mod operations;
pub mod options;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use bluesnap_types as types;
pub use rust_decimal::Decimal;
