use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use malignet_core::{
    config::{
        mock_delay_from_env_value, provider_kind_from_env_value, request_timeout_from_env_value,
    },
    AssessmentService, CoreConfig,
};

/// Main entry point for the MaligNet application
///
/// Resolves configuration once from the environment (and `.env`), then serves the REST API.
///
/// # Environment Variables
/// - `MALIGNET_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MALIGNET_PROVIDER`: `local`, `mock` or `http` (default: "local")
/// - `MALIGNET_MOCK_DELAY_MS`: artificial delay of the mock provider (default: 2000)
/// - `MALIGNET_SUMMARY_URL`: base URL of the summary backend, required for `http`
/// - `MALIGNET_REQUEST_TIMEOUT_SECS`: timeout for backend requests (default: 30)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - any configuration value is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("malignet_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("malignet_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("MALIGNET_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        provider_kind_from_env_value(std::env::var("MALIGNET_PROVIDER").ok())?,
        mock_delay_from_env_value(std::env::var("MALIGNET_MOCK_DELAY_MS").ok())?,
        std::env::var("MALIGNET_SUMMARY_URL").ok(),
        request_timeout_from_env_value(std::env::var("MALIGNET_REQUEST_TIMEOUT_SECS").ok())?,
    )?;

    tracing::info!(provider = ?cfg.provider(), "++ Starting MaligNet REST on {}", rest_addr);

    let app = router(AppState::new(AssessmentService::new(&cfg)?));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
