use hyper::StatusCode;
use std::time::Duration;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(FunctionResponse::text(StatusCode::OK, "fast").into())
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
