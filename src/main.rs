use anyhow::Context;
use chat_stream_client::{ChatClient, ChatEvent, ClientConfig, DEFAULT_THREAD_ID};
use clap::Parser;
use futures::StreamExt;
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Send one message to the chat backend and print the streamed reply
#[derive(Debug, Parser)]
#[command(name = "chat-stream", version)]
struct Args {
    /// Message to send
    message: String,

    /// Conversation thread
    #[arg(long, default_value = DEFAULT_THREAD_ID, conflicts_with = "new_thread")]
    thread_id: String,

    /// Start a fresh thread with a random id
    #[arg(long)]
    new_thread: bool,

    /// Backend base URL, e.g. http://127.0.0.1:8000
    #[arg(long)]
    base_url: Option<String>,

    /// TOML config file
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let thread_id = if args.new_thread {
        uuid::Uuid::new_v4().to_string()
    } else {
        args.thread_id
    };

    let client = ChatClient::new(config).context("invalid client configuration")?;
    info!(endpoint = %client.endpoint_url(), %thread_id, "Starting chat stream");

    let mut events = client.send_message_in_thread(&args.message, &thread_id);
    let mut stdout = std::io::stdout();

    loop {
        let event = tokio::select! {
            event = events.next() => event,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, closing stream");
                break;
            }
        };

        let Some(event) = event else {
            break;
        };

        match event.context("chat stream failed")? {
            ChatEvent::Text { content } => {
                write!(stdout, "{}", content)?;
                stdout.flush()?;
            }
            ChatEvent::Done => break,
            ChatEvent::Unknown { kind, .. } => warn!(%kind, "Ignoring unknown event"),
        }
    }

    writeln!(stdout)?;
    Ok(())
}
