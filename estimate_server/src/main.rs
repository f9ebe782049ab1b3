use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use estimate_server::{config::load_config, init_tracing, server::start_server};

#[derive(Parser, Debug)]
#[command(name = "tantya-server", version, about = "Tantya estimate HTTP service")]
struct Args {
    /// Configuration file path (estimate_server.toml in the working directory if omitted)
    #[arg(short, long, env = "TANTYA_SERVER_CONFIG")]
    config: Option<PathBuf>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.server.log_level);
    info!("Tantya estimate server v{}", env!("CARGO_PKG_VERSION"));

    start_server(config).await
}
