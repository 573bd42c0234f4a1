use board_server::{print_banner, setup_environment, Config, Server, ServerState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;

    print_banner();

    tracing::info!("🍽️ ListoYa board server starting...");

    // 2. Load configuration (store endpoint and access key are required)
    let config = Config::from_env()?;

    // 3. Connect to the order store and build the views
    let state = ServerState::initialize(&config).await?;

    // 4. Serve (mounts the views as background tasks)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
