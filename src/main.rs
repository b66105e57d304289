// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use xcs_dashboard::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // A bad configuration stops the process before it binds anything.
    let app_state = AppState::new().await?;
    let addr = app_state.config.bind_addr;

    let app = router(app_state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Dashboard API listening on {}", listener.local_addr()?);
    tracing::info!("📖 Swagger UI at http://{}/swagger-ui", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
