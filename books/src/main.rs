use svc_core::{ServerConfig, ServerError};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenvy::dotenv().ok();
    svc_core::logging::init_logging();

    let config = ServerConfig::from_env("BOOKS", 8000)?;
    let listener = TcpListener::bind(config.addr()).await?;
    info!(service = "books", addr = %config.addr(), version = env!("CARGO_PKG_VERSION"), "starting");
    books_server::run(listener).await?;
    info!(service = "books", "stopped");
    Ok(())
}
