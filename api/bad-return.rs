//! Settles with a plain JSON value instead of a response

use serde_json::json;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::FunctionRequest;

async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    Ok(HandlerValue::Json(json!({ "message": "not a response" })))
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
