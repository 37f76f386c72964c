use svc_core::{ServerConfig, ServerError};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenvy::dotenv().ok();
    svc_core::logging::init_logging();

    let config = ServerConfig::from_env("COUNTER", 8001)?;
    let listener = TcpListener::bind(config.addr()).await?;
    info!(service = "counter", addr = %config.addr(), version = env!("CARGO_PKG_VERSION"), "starting");
    counter_server::run(listener).await?;
    info!(service = "counter", "stopped");
    Ok(())
}
