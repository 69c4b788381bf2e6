use anyhow::Context;

use shelfscan_api::app::{self, services::AppServices};
use shelfscan_infra::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    shelfscan_observability::init();

    let settings = Settings::from_env().context("invalid configuration")?;
    let services =
        AppServices::from_settings(&settings).context("failed to set up catalog source")?;

    tracing::info!(
        source = %services.describe(),
        reference_price = %settings.reference_price,
        unparsed_unit_price = settings.unit_price_policy.as_str(),
        "catalog source configured"
    );

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
