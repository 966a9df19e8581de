use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use welltrace::api::create_router;

#[tokio::main]
async fn main() -> welltrace::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let addr = std::env::var("WELLTRACE_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let app = create_router();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "welltrace API listening");
    info!("POST /api/trajectory (multipart/form-data: survey file + optional config TOML)");
    info!("POST /api/trajectory/report (same form, text report response)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C, shutting down");
        return;
    }
    info!("Ctrl-C received, draining connections");
}
