//! Helpers shared by the integration tests.

use futures::future::BoxFuture;
use restcall::core::{RestCallError, Runtime, Transport, TransportRequest, TransportResponse};
use std::sync::{Arc, Mutex};

/// Transport recording every request and answering with a fixed response.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub requests: Arc<Mutex<Vec<TransportRequest>>>,
    pub response: Option<TransportResponse>,
}

impl RecordingTransport {
    pub fn answering(status: u16, body: &str) -> Self {
        Self {
            response: Some(TransportResponse {
                status,
                body: (!body.is_empty()).then(|| body.as_bytes().to_vec()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, RestCallError> {
        self.requests.lock().unwrap().push(request);
        self.response.clone().ok_or(RestCallError::Connect {
            details: "connection refused".into(),
        })
    }
}

/// Runtime polling every task to completion on a fresh thread.
pub struct ThreadRuntime;

impl Runtime for ThreadRuntime {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        std::thread::spawn(move || futures::executor::block_on(future));
    }
}

/// Install a logger, honouring `RUST_LOG`.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
