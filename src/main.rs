use anyhow::Context;
use dealdesk::{api, config::Config, MockSalesOrderGateway, Repository, SalesOrderGateway};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;
    let port = config.port;

    let repo = if config.seed_demo_data {
        Repository::seeded(config.exchange_rates.clone())
    } else {
        Repository::new(config.exchange_rates.clone())
    };
    let gateway: Arc<dyn SalesOrderGateway> = Arc::new(
        MockSalesOrderGateway::new()
            .with_latency(Duration::from_millis(config.sales_order_latency_ms)),
    );

    tracing::info!(
        seeded = config.seed_demo_data,
        currencies = config.exchange_rates.len(),
        "repository ready"
    );

    let app = api::create_router(api::AppState::new(Arc::new(repo), config, gateway));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
