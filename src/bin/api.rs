use std::net::SocketAddr;

use clap::Parser;
use gpt_gateway::core::config::AppConfig;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "gpt-gateway")]
#[command(about = "HTTP gateway relaying prompts to an OpenAI chat model")]
#[command(version)]
struct Cli {
    /// Port to run the server on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    gpt_gateway::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        e
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    gpt_gateway::api::start_server(addr, config).await
}
