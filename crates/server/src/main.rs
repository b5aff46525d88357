use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;
mod cors;

use config::ServerConfig;

#[derive(Parser)]
#[command(name = "lovense-cloud")]
#[command(about = "MCP adapter relaying toy commands to the Lovense cloud API", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lovense.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "8787")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Lovense developer token
    #[arg(long, env = "LOVENSE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// User id the toys are bound to
    #[arg(long, env = "LOVENSE_UID")]
    uid: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lovense_server=info,lovense_mcp=info,lovense_relay=info,tower_http=debug".into()
            }),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Lovense cloud MCP adapter");

    // Load configuration
    let config = ServerConfig::load(&args.config)?.with_overrides(args.token, args.uid);

    if !config.credentials().has_token() {
        tracing::warn!("LOVENSE_TOKEN not configured; tool calls will return an error");
    }

    // Start API server
    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Starting API server on {}", addr);

    api::serve(&addr, config).await?;

    Ok(())
}
