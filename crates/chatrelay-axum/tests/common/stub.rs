//! In-memory `CompletionPort` that records what it was asked.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chatrelay_axum::{AxumContext, CorsConfig, create_router};
use chatrelay_core::{CompletionError, CompletionPort, CompletionRequest};
use serde_json::Value;

/// Returns a fixed result for every call and keeps every request.
pub struct StubCompletion {
    result: Result<Value, CompletionError>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletion {
    pub fn returning(result: Result<Value, CompletionError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionPort for StubCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, CompletionError> {
        self.seen.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

/// Router over a stub upstream with permissive CORS.
pub fn router_with(stub: &Arc<StubCompletion>) -> axum::Router {
    router_with_cors(stub, &CorsConfig::AllowAll)
}

pub fn router_with_cors(stub: &Arc<StubCompletion>, cors: &CorsConfig) -> axum::Router {
    let port: Arc<dyn CompletionPort> = stub.clone();
    create_router(AxumContext::new(port), cors)
}
