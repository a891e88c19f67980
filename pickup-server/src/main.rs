use anyhow::Result;
use pickup_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Starting pickup server"
    );

    Server::new(config).run().await
}
