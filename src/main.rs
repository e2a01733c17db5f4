use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin_forms_core::ConfigManager;
use api_rest::{router, AppState, RestConfig};

/// Main entry point for the admin forms service
///
/// Loads the entity configuration once and serves the REST API.
///
/// # Environment Variables
/// - `ADMIN_FORMS_CONFIG`: path to the entity configuration YAML (default: "admin_forms.yaml")
/// - `ADMIN_FORMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration loading, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("admin_forms_core=info".parse()?)
                .add_directive("admin_forms_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_config = RestConfig::from_env_values(
        std::env::var("ADMIN_FORMS_CONFIG").ok(),
        std::env::var("ADMIN_FORMS_REST_ADDR").ok(),
    )?;

    let config = ConfigManager::from_path(rest_config.config_path())?;
    tracing::info!(
        "++ Loaded {} entities from {}",
        config.entities().count(),
        rest_config.config_path().display()
    );

    let app = router(AppState::new(config));

    tracing::info!("++ Starting admin forms REST on {}", rest_config.rest_addr());
    let listener = tokio::net::TcpListener::bind(rest_config.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
