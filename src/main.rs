//! GitLab Digest - commit history lookup over the GitLab REST API
//!
//! # Usage
//! ```bash
//! gitlab-digest                          # Serve on 127.0.0.1:8080
//! gitlab-digest --host 0.0.0.0 -p 9000   # Custom bind address
//! ```
//!
//! Upstream and login settings are read from the environment (or `.env`):
//! `GITLAB_API_URL`, `GITLAB_TOKEN`, `GITLAB_TIMEOUT_SECS`, `GITLAB_MAX_PAGES`,
//! `ADMIN_USERNAME`, `ADMIN_PASSWORD`, `SECRET_KEY`, `ACCESS_TOKEN_EXPIRE_MINUTES`.

mod auth;
mod config;
mod error;
mod gitlab;
mod models;
mod routes;
mod state;

use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;
use state::AppState;

/// GitLab Digest - list a branch's commits for a date range
#[derive(Parser)]
#[command(name = "gitlab-digest")]
#[command(about = "Commit history lookup over the GitLab API", long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HTTP_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, env = "HTTP_PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    config.warn_on_weak_settings();
    tracing::info!("Using GitLab API at {}", config.gitlab.api_url);

    let state = Arc::new(AppState::from_config(&config)?);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  GitLab Digest");
    println!("  Server:  http://{}", addr);
    println!("  GitLab:  {}", config.gitlab.api_url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
