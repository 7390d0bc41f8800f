use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use todo_rest::app_env::AppConfig;
use todo_rest::{SharedData, build_router, logging, persistence};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let loaded_dotenv = dotenv().is_ok();
    let config = AppConfig::from_env().context("reading configuration from the environment")?;

    let otel_exporters = match (&config.otel_span_export_url, &config.otel_metric_export_url) {
        (Some(span_url), Some(metric_url)) => Some(logging::init_exporters(span_url, metric_url)?),
        _ => None,
    };
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);
    if !loaded_dotenv {
        info!("No .env file found, configuring from the environment only");
    }

    let todo_store = persistence::connect_todo_store(&config).await?;
    let app = build_router(SharedData { todo_store });

    let listener = TcpListener::bind(&config.server_address)
        .await
        .with_context(|| format!("binding to {}", config.server_address))?;
    info!(address = %config.server_address, "Starting server.");
    axum::serve(listener, app)
        .await
        .context("serving HTTP requests")?;

    Ok(())
}
