//! In-memory transport for dispatch tests.

use bytes::Bytes;
use http::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Records every request it is given and answers from a queue of canned responses.
///
/// Answers with a transport error once the queue is empty.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        let response = HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        };
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, context: &'static str) -> Self {
        let error = TransportError::new(context, "connection reset by peer");
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(TransportError::new("mock transport", "no response queued")))
    }
}
