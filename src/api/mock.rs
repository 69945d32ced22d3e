use std::cell::RefCell;
use std::collections::VecDeque;

use super::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::AppError;

/// Scripted transport for tests: answers from a queue and records requests.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, AppError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, body.to_string().into_bytes());
    }

    pub fn push_raw(&self, status: u16, body: Vec<u8>) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body }));
    }

    pub fn push_error(&self, err: AppError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("no scripted response".to_string())))
    }
}
