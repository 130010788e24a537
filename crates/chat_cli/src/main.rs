mod terminal;

use std::io::Write;
use std::sync::Arc;

use chat_core::{Config, ProxyReply};
use chat_state::{
    ChatController, ChatSession, ClientError, HttpProxyClient, Notifier, ProxyClient,
    SessionState, SilentNotifier, DEFAULT_GREETING,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use terminal::{TerminalBell, TerminalView};

#[derive(Parser)]
#[command(name = "chat-cli")]
#[command(about = "Terminal chat client for the chat relay")]
#[command(version)]
struct Cli {
    /// Base URL of the relay (defaults to config.toml / PROXY_URL)
    #[arg(long)]
    proxy_url: Option<String>,

    /// Do not ring the terminal bell on replies
    #[arg(long, default_value = "false")]
    quiet: bool,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat
    Chat,
    /// Send a single message and print the exchange
    Send {
        /// Message content
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(cli.debug))
        .init();

    let proxy_url = cli.proxy_url.unwrap_or_else(|| Config::new().proxy_url);
    tracing::debug!("Proxy URL: {}", proxy_url);

    let client: Arc<dyn ProxyClient> = Arc::new(HttpProxyClient::new(&proxy_url));
    let notifier: Box<dyn Notifier> = if cli.quiet {
        Box::new(SilentNotifier)
    } else {
        Box::new(TerminalBell)
    };

    match cli.command {
        Commands::Chat => run_interactive_chat(client, notifier).await,
        Commands::Send { message } => send_message(client, notifier, message).await,
    }
}

async fn send_message(
    client: Arc<dyn ProxyClient>,
    notifier: Box<dyn Notifier>,
    message: String,
) -> anyhow::Result<()> {
    let mut controller = ChatController::new(client, notifier, TerminalView::stdout(true));

    if controller.send(message).await.is_none() {
        println!("{}", "Nothing to send".dimmed());
    }

    Ok(())
}

async fn run_interactive_chat(
    client: Arc<dyn ProxyClient>,
    notifier: Box<dyn Notifier>,
) -> anyhow::Result<()> {
    let session = ChatSession::with_state(SessionState::with_greeting(DEFAULT_GREETING));
    let mut controller =
        ChatController::with_session(session, client, notifier, TerminalView::stdout(false));

    println!("{}", "Type 'exit' or 'quit' to leave".dimmed());
    if let Some(greeting) = controller.state().latest().cloned() {
        controller.view_mut().print_message(&greeting);
    }
    controller.view_mut().print_prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (settle_tx, mut settle_rx) = mpsc::channel::<Result<ProxyReply, ClientError>>(1);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let input = line.trim();

                if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                    println!("{}", "Goodbye!".cyan());
                    break;
                }

                if !controller.state().accepts_user_input() {
                    controller
                        .view_mut()
                        .print_notice("Still waiting for the last reply; message dropped");
                    continue;
                }

                controller.edit_draft(line);
                match controller.begin_submission() {
                    Some(message) => {
                        let client = controller.client();
                        let settle_tx = settle_tx.clone();
                        tokio::spawn(async move {
                            let result = client.send_message(&message).await;
                            let _ = settle_tx.send(result).await;
                        });
                    }
                    None => controller.view_mut().print_prompt(),
                }
            }
            Some(result) = settle_rx.recv() => {
                controller.settle(result);
                controller.view_mut().print_prompt();
            }
        }
    }

    std::io::stdout().flush()?;
    Ok(())
}
