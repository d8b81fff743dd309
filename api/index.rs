//! `GET /api`: runtime name and version

use hyper::StatusCode;
use serde_json::json;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    let body = json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    });
    Ok(FunctionResponse::json(StatusCode::OK, &body)?.into())
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
