use std::sync::Arc;

use lol_match_stats::{config, logging, service, RiotClient};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;

    logging::init(&cfg.log).map_err(|e| anyhow::anyhow!(e))?;
    info!(
        region = %cfg.api.region,
        platform = %cfg.api.platform,
        "Logging initialised. Starting match stats server"
    );

    let client = RiotClient::from_config(&cfg.api)?;
    let app = service::router(Arc::new(client));

    let listener = tokio::net::TcpListener::bind(cfg.server.bind).await?;
    info!(addr = %cfg.server.bind, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
