use pcast_core::PcastConfig;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = PcastConfig::from_env()?;

    pcast_api::telemetry::init_tracing();
    config.validate()?;

    // Initialize the application (database, storage, services, routes)
    let (_state, router) = pcast_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    pcast_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
