use hyper::StatusCode;
use serde_json::json;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    Ok(FunctionResponse::json(StatusCode::OK, &json!({ "message": "demo-ok" }))?.into())
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
