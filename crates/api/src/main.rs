use std::sync::Arc;

use anyhow::Context;

use vendorhub_api::app::{self, services::AppServices};
use vendorhub_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vendorhub_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(AppServices::new(&config));
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
