//! Chat relay HTTP server binary.
//!
//! Serves `POST /api/chat`. Requires `GOOGLE_API_KEY`; everything else has a
//! default. Variables may also come from a `.env` file.

use std::path::PathBuf;
use std::sync::Arc;

use chatrelay_api::config::{ApiConfig, UpstreamConfig};
use chatrelay_core::completion::CompletionClient;
use chatrelay_core::completion::gemini::GeminiProvider;
use chatrelay_core::knowledge::KnowledgeStore;
use chatrelay_core::quote::QuoteClient;
use chatrelay_core::quote::yahoo::YahooQuoteProvider;
use chatrelay_core::resolver::AnswerResolver;
use clap::Parser;
use tracing::{info, warn};

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "chatrelay_server", about = "Chat relay server", version)]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Knowledge file: a flat JSON object of trigger phrase → answer.
    #[arg(long = "knowledge", env = "KNOWLEDGE_PATH", default_value = "./server/knowledge.json")]
    knowledge_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,chatrelay_api=debug,chatrelay_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        knowledge_path: args.knowledge_path,
        upstream: UpstreamConfig::from_env()?,
    };

    info!(
        version = chatrelay_core::version(),
        bind_addr = %config.bind_addr,
        knowledge_path = %config.knowledge_path.display(),
        gemini_model = %config.upstream.gemini_model,
        "starting chatrelay_server"
    );

    let knowledge = KnowledgeStore::load_or_empty(&config.knowledge_path);
    info!(entries = knowledge.len(), "knowledge table ready");

    // One HTTP client for the process lifetime, shared by both providers.
    let http = reqwest::Client::new();
    let quotes = QuoteClient::new(Arc::new(YahooQuoteProvider::new(
        http.clone(),
        config.upstream.quote_base_url.clone(),
    )));
    let completions = CompletionClient::new(Arc::new(GeminiProvider::new(
        http,
        config.upstream.google_api_key.clone(),
        config.upstream.gemini_model.clone(),
        config.upstream.gemini_base_url.clone(),
    )));

    let resolver = AnswerResolver::standard(Arc::new(knowledge), quotes, completions);
    let app = chatrelay_api::router(chatrelay_api::AppState::new(resolver));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "server running on http://{local_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
