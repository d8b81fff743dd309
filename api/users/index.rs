use hyper::StatusCode;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    Ok(FunctionResponse::text(StatusCode::OK, "users-index").into())
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
