use fsroute::config::RuntimeConfig;
use fsroute::{functions, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = RuntimeConfig::load()?;
    logger::init(&cfg.logging)?;

    // Worker threads follow config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let running = server::start_server(&cfg, &functions::registry()).await?;

    tokio::signal::ctrl_c().await?;
    logger::log_info("Ctrl+C received, shutting down");
    running.close().await;
    Ok(())
}
