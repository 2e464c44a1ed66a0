use clap::Parser;
use std::sync::Arc;

mod config;
mod deployer;
mod error;
mod extract;
mod generator;
mod handlers;
mod metrics;
mod models;
mod state;
#[cfg(test)]
mod test_support;

use config::{Args, ProviderConfig};
use state::AppState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // parse cli arguments
    let args = Args::parse();
    let config = ProviderConfig::from(&args);

    if config.gemini_api_key.is_none() {
        log::warn!("GEMINI_API_KEY is not set, generation requests will fail");
    }
    if config.vercel_token.is_none() {
        log::warn!("VERCEL_TOKEN is not set, deployments will fail");
    }

    log::info!("Generating with {} at {}", config.gemini_model, config.gemini_url);
    log::info!("Deploying to {} (target: {})", config.vercel_url, config.target);

    let state = Arc::new(AppState::new(config));
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("Site gateway running on http://localhost:{}", args.port);
    axum::serve(listener, app).await
}
