//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gymflow::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: RUST_LOG controla o nível (padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config);

    let app = gymflow::app(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📖 Documentação em http://{}/swagger-ui", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
