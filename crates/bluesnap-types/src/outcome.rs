//! The result of a completed exchange with the gateway.
//!
//! A decline or a validation error is an expected business result, not a fault,
//! so it is returned as [`Outcome::Declined`] inside `Ok` rather than as an error.

use crate::errors::GatewayErrors;

/// Either the decoded success payload or the gateway's error envelope.
#[must_use = "a declined outcome must be handled"]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<R> {
    Success(R),
    Declined(GatewayErrors),
}

impl<R> Outcome<R> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, Outcome::Declined(_))
    }

    pub fn success(self) -> Option<R> {
        match self {
            Outcome::Success(r) => Some(r),
            Outcome::Declined(_) => None,
        }
    }

    pub fn declined(self) -> Option<GatewayErrors> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Declined(e) => Some(e),
        }
    }

    pub fn map<U, F: FnOnce(R) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(r) => Outcome::Success(f(r)),
            Outcome::Declined(e) => Outcome::Declined(e),
        }
    }

    /// Turns a decline into an `Err`, for callers that want to use `?`.
    pub fn into_result(self) -> Result<R, GatewayErrors> {
        match self {
            Outcome::Success(r) => Ok(r),
            Outcome::Declined(e) => Err(e),
        }
    }
}

impl<R> From<Outcome<R>> for Result<R, GatewayErrors> {
    fn from(outcome: Outcome<R>) -> Self {
        outcome.into_result()
    }
}
