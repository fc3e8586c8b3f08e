use anyhow::Context as _;
use bookshelf::config::Settings;
use bookshelf::container::Container;
use bookshelf::persistence::InMemoryDatabase;
use bookshelf::{http, telemetry};
use bookshelf_domain::snowflake::Snowflake;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    telemetry::init(&settings.log);

    let ids = Snowflake::builder()
        .worker_id(settings.snowflake.worker_id)
        .data_center_id(settings.snowflake.data_center_id)
        .build()
        .context("invalid snowflake settings")?;

    let db = InMemoryDatabase::new();
    let container = Arc::new(Container::new(&db, Arc::new(ids)));
    let app = http::router(container, settings.errors.contact_email.as_str());

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, "bookshelf listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("bookshelf stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
