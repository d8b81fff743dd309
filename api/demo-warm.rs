//! Counts its own invocations; the counter lives as long as the process

use hyper::StatusCode;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn increment(count: Arc<AtomicU64>) -> anyhow::Result<HandlerValue> {
    let count = count.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(FunctionResponse::json(StatusCode::OK, &json!({ "count": count }))?.into())
}

pub fn module() -> FunctionModule {
    let count = Arc::new(AtomicU64::new(0));
    FunctionModule::new().get(move |_request: FunctionRequest| increment(Arc::clone(&count)))
}
