//! Sleeps past the default invocation budget

use hyper::StatusCode;
use std::time::Duration;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    tokio::time::sleep(Duration::from_millis(5000)).await;
    Ok(FunctionResponse::text(StatusCode::OK, "too-late").into())
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
