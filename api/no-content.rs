//! 204 with a null body when the request carries none

use hyper::StatusCode;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn get(request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    if request.text().is_empty() {
        return Ok(FunctionResponse::no_body(StatusCode::NO_CONTENT).into());
    }
    Ok(FunctionResponse::text(StatusCode::BAD_REQUEST, "unexpected request body").into())
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
