use anyhow::bail;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::FunctionRequest;

async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    bail!("boom")
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
