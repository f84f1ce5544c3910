//! The seam between the connector and the HTTP client.
//!
//! [`Connector`](crate::connector::Connector) never talks to the network itself. It hands a
//! fully-built [`HttpRequest`] to an [`HttpTransport`] and gets back the status and the
//! complete body. TLS, pooling, redirects, timeouts and any retry policy are the
//! transport's business.
//!
//! `reqwest::Client` implements [`HttpTransport`] out of the box. Configure its
//! timeout on the client builder; the connector does not set one.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::sync::Arc;
use url::Url;

/// An outbound request, ready to send.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A completed exchange: the status and the full body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// The request could not be completed: DNS, connect, TLS, timeout, or a broken body stream.
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
pub struct TransportError {
    context: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(
        context: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            context,
            source: source.into(),
        }
    }

    pub fn context(&self) -> &'static str {
        self.context
    }
}

/// Executes one HTTP exchange.
///
/// Implementations must be safe to share between concurrent calls.
pub trait HttpTransport {
    /// Sends `request` and reads the whole response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no complete response was received. Any status
    /// code, including 4xx and 5xx, is a successful exchange at this level.
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpTransport + Send + Sync> HttpTransport for Arc<T> {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        self.as_ref().execute(request)
    }
}

impl HttpTransport for reqwest::Client {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| TransportError::new("send request", e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::new("read response body", e))?;
        Ok(HttpResponse { status, body })
    }
}
