//! The connector: one authenticated JSON exchange with the Payment API.
//!
//! Every operation goes through [`Connector::execute`], which
//!
//! 1. serializes the request payload, if there is one,
//! 2. builds the URL from the base URL and the operation path,
//! 3. sets `Authorization: Basic ...`, `Content-Type` and `Accept`,
//! 4. hands the request to the [`HttpTransport`],
//! 5. and sorts the response by status: 400 and above decodes the gateway's error
//!    envelope into [`Outcome::Declined`], anything below decodes the expected payload
//!    into [`Outcome::Success`].
//!
//! A declined call is not an `Err`. `Err(ConnectorError)` means the exchange itself
//! failed or produced something unreadable.
//!
//! ## Example
//!
//! ```rust
//! use bluesnap_rs::connector::Connector;
//!
//! let connector = Connector::try_from("https://sandbox.bluesnap.com").unwrap();
//! assert_eq!(connector.base_url().as_str(), "https://sandbox.bluesnap.com/");
//! ```

use bluesnap_types::{
    Deserializable, GatewayErrors, MethodKind, Outcome, PayloadError, Serializable,
};
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};
use url::Url;

use crate::options::Options;
use crate::transport::{HttpRequest, HttpTransport, TransportError};

/// Errors that can occur while talking to the gateway.
///
/// A gateway decline is not one of them; see [`Outcome::Declined`].
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// The request payload could not be encoded. Nothing was sent.
    #[error("Failed to serialize request: {context}: {source}")]
    Serialization {
        context: &'static str,
        #[source]
        source: PayloadError,
    },
    /// The transport failed. The request may or may not have reached the gateway.
    #[error("Network error: {context}: {source}")]
    Network {
        context: &'static str,
        #[source]
        source: TransportError,
    },
    /// The body did not match the success schema or the error envelope.
    #[error("Failed to deserialize response with status {status}: {context}: {source}")]
    Deserialization {
        context: &'static str,
        status: StatusCode,
        #[source]
        source: PayloadError,
    },
    /// The request and response payloads belong to different payment methods. Nothing was sent.
    #[error("Payment method mismatch: {context}: request is {request}, response is {response}")]
    MethodMismatch {
        context: &'static str,
        request: MethodKind,
        response: MethodKind,
    },
    #[error("Invalid argument: {context}: {reason}")]
    InvalidArgument {
        context: &'static str,
        reason: String,
    },
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
}

impl ConnectorError {
    /// A short, stable name for the variant. Safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectorError::Serialization { .. } => "serialization",
            ConnectorError::Network { .. } => "network",
            ConnectorError::Deserialization { .. } => "deserialization",
            ConnectorError::MethodMismatch { .. } => "method_mismatch",
            ConnectorError::InvalidArgument { .. } => "invalid_argument",
            ConnectorError::UrlParse { .. } => "url_parse",
        }
    }

    /// Whether the gateway may have processed the request.
    ///
    /// When true, retrieve the transaction before resubmitting a charge.
    pub fn may_have_reached_gateway(&self) -> bool {
        matches!(
            self,
            ConnectorError::Network { .. } | ConnectorError::Deserialization { .. }
        )
    }
}

/// Client for the Payment API.
///
/// Cheap to clone and safe to share across tasks when the transport is.
#[derive(Debug, Clone)]
pub struct Connector<T = reqwest::Client> {
    transport: T,
    /// Base URL of the API (e.g. `https://sandbox.bluesnap.com/`)
    base_url: Url,
}

impl<T> Connector<T> {
    /// Builds a connector over `transport`.
    ///
    /// Any query or fragment on `base_url` is dropped; its path is kept as a prefix.
    pub fn new(transport: T, mut base_url: Url) -> Result<Self, ConnectorError> {
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConnectorError::InvalidArgument {
                context: "Connector::new",
                reason: format!("base URL must be an http(s) URL, got {base_url}"),
            });
        }
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self {
            transport,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Appends the segments of `path` to the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ConnectorError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConnectorError::InvalidArgument {
                context: "endpoint",
                reason: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

impl Connector {
    /// Builds a connector over a default `reqwest::Client`.
    pub fn try_new(base_url: Url) -> Result<Self, ConnectorError> {
        Connector::new(reqwest::Client::new(), base_url)
    }
}

impl<T: HttpTransport> Connector<T> {
    /// Performs one exchange and sorts the response by status.
    ///
    /// `request` is `None` for calls without a body. `context` names the operation in
    /// errors and traces (e.g. `"sale"`).
    ///
    /// # Errors
    ///
    /// See [`ConnectorError`]. Serialization happens before anything is sent, so a
    /// [`ConnectorError::Serialization`] guarantees the gateway never saw the call.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "bluesnap.connector.execute",
            skip_all,
            fields(
                operation = context,
                http.method = %method,
                url.path = path,
                http.status_code = tracing::field::Empty,
                otel.status_code = tracing::field::Empty,
                error.kind = tracing::field::Empty,
            )
        )
    )]
    pub async fn execute<R: Deserializable>(
        &self,
        method: Method,
        path: &str,
        request: Option<&(dyn Serializable + Sync)>,
        options: &Options,
        context: &'static str,
    ) -> Result<Outcome<R>, ConnectorError> {
        let result = self
            .execute_inner(method, path, request, options, context)
            .await;
        record_result_on_span(&result);
        result
    }

    async fn execute_inner<R: Deserializable>(
        &self,
        method: Method,
        path: &str,
        request: Option<&(dyn Serializable + Sync)>,
        options: &Options,
        context: &'static str,
    ) -> Result<Outcome<R>, ConnectorError> {
        let body = match request {
            Some(payload) => payload
                .to_json()
                .map(Bytes::from)
                .map_err(|e| ConnectorError::Serialization { context, source: e })?,
            None => Bytes::new(),
        };

        let url = self.endpoint(path)?;
        let authorization = options.credentials.authorization_header().map_err(|_| {
            ConnectorError::InvalidArgument {
                context,
                reason: "credentials do not form a valid Authorization header".to_string(),
            }
        })?;
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .map_err(|e| ConnectorError::Network { context, source: e })?;

        let status = response.status;
        #[cfg(feature = "telemetry")]
        {
            Span::current().record("http.status_code", status.as_u16());
            tracing::debug!(body.len = response.body.len(), "Response received");
        }

        // Only a decoded envelope is a decline. An empty failure body is unreadable.
        if status.as_u16() >= 400 {
            let errors = GatewayErrors::from_json(&response.body).map_err(|e| {
                ConnectorError::Deserialization {
                    context,
                    status,
                    source: e,
                }
            })?;
            Ok(Outcome::Declined(errors.with_status_code(status.as_u16())))
        } else {
            let payload = R::from_json(&response.body).map_err(|e| {
                ConnectorError::Deserialization {
                    context,
                    status,
                    source: e,
                }
            })?;
            Ok(Outcome::Success(payload))
        }
    }
}

/// Parses a base URL and builds a connector over a default `reqwest::Client`.
impl TryFrom<&str> for Connector {
    type Error = ConnectorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(value).map_err(|e| ConnectorError::UrlParse {
            context: "Failed to parse base url",
            source: e,
        })?;
        Connector::try_new(url)
    }
}

impl TryFrom<String> for Connector {
    type Error = ConnectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Connector::try_from(value.as_str())
    }
}

/// Records the outcome of a call on the current span.
///
/// Only error kinds, status codes and gateway error names are logged. Error messages
/// can quote the body, which may hold card data.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R>(result: &Result<Outcome<R>, ConnectorError>) {
    let span = Span::current();
    match result {
        Ok(Outcome::Success(_)) => {
            span.record("otel.status_code", "OK");
            tracing::debug!("Gateway call succeeded");
        }
        Ok(Outcome::Declined(errors)) => {
            span.record("otel.status_code", "OK");
            let names: Vec<&str> = errors
                .messages()
                .iter()
                .map(|m| m.error_name.as_str())
                .collect();
            tracing::warn!(
                status = errors.status_code(),
                errors = ?names,
                "Gateway declined the request"
            );
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.kind", err.kind());
            tracing::error!(error.kind = err.kind(), "Gateway call failed");
        }
    }
}

#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R>(_result: &Result<Outcome<R>, ConnectorError>) {}
