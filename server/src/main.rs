use anyhow::Context;
use hrms_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;
    init_logger(Some(&config.log_dir));

    print_banner();
    tracing::info!(
        environment = %config.environment,
        "HRMS server starting..."
    );

    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
