//! Sends one email through Postmark
//!
//! ```text
//! POSTMARK_SERVER_TOKEN=... cargo run -p postmark --example send_email -- \
//!     --from sender@example.com --to receiver@example.com \
//!     --subject "Hello" --text "Hello from Postmark" --attach report.pdf
//! ```

use std::path::PathBuf;

use clap::Parser;
use postmark::{ClientConfig, Message, PostmarkClient, PostmarkError};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Postmark server API token
    #[arg(long, env = "POSTMARK_SERVER_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long)]
    from: String,

    /// One or more comma-separated recipients
    #[arg(long)]
    to: String,

    #[arg(long, default_value = "")]
    cc: String,

    #[arg(long, default_value = "")]
    subject: String,

    #[arg(long, default_value = "")]
    text: String,

    #[arg(long, default_value = "")]
    html: String,

    #[arg(long, default_value = "")]
    tag: String,

    /// Custom header as Name:Value, may be repeated
    #[arg(long = "header")]
    headers: Vec<String>,

    /// File to attach, may be repeated
    #[arg(long = "attach")]
    attachments: Vec<PathBuf>,

    /// Print the JSON payload instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "POSTMARK_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()?
    } else {
        tracing_subscriber::EnvFilter::new(format!(
            "postmark={level},send_email={level},reqwest=warn,hyper=warn",
            level = cli.log_level
        ))
    };
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_target(false));
    tracing::subscriber::set_global_default(subscriber)?;

    let mut message = Message::new(cli.token);
    message.sender = cli.from;
    message.to = cli.to;
    message.cc = cli.cc;
    message.subject = cli.subject;
    message.text_body = cli.text;
    message.html_body = cli.html;
    message.tag = cli.tag;

    for header in &cli.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("Header must be Name:Value, got {}", header))?;
        message.add_custom_header(name.trim(), value.trim());
    }
    for path in &cli.attachments {
        message.add_attachment(path)?;
    }

    if cli.dry_run {
        println!("{}", String::from_utf8(message.build_payload()?)?);
        return Ok(());
    }

    let client = PostmarkClient::with_config(ClientConfig::from_env()?)?;
    match client.send(&message).await {
        Ok(reply) => {
            tracing::info!("Sent {} at {}", reply.message_id, reply.submitted_at);
            Ok(())
        }
        Err(PostmarkError::Remote(reply)) => {
            anyhow::bail!("Postmark error {}: {}", reply.error_code, reply.message)
        }
        Err(e) => Err(e.into()),
    }
}
