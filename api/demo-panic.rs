use crate::handler::{FunctionModule, HandlerValue};
use crate::http::FunctionRequest;

#[allow(clippy::unused_async)]
async fn get(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    panic!("boom")
}

pub fn module() -> FunctionModule {
    FunctionModule::new().get(get)
}
