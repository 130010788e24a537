use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::{load_forwarder_config, WebService};

#[derive(Parser, Debug)]
#[command(name = "chat-relay")]
#[command(about = "Relays chat widget messages to the automation webhook")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "APP_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, env = "APP_PORT", default_value = "8080")]
    port: u16,

    /// Override the webhook URL from config.toml / WEBHOOK_URL
    #[arg(long)]
    webhook_url: Option<String>,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(long, short, default_value = "false")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let mut config = load_forwarder_config();
    if let Some(url) = cli.webhook_url {
        config.webhook_url = url;
    }

    tracing::info!("Starting chat relay...");
    let mut service = WebService::new(config);
    service
        .start(&cli.host, cli.port)
        .await
        .map_err(anyhow::Error::msg)?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    service.stop().await.map_err(anyhow::Error::msg)?;
    Ok(())
}
