use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rent_engine::config::Config;
use rent_engine::error::{AppError, Result};
use rent_engine::request::{handle, parse_request, Request};

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    // stdout carries the JSON payload; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| AppError::Request("usage: rent-engine <request.json>".to_string()))?;

    let raw = tokio::fs::read_to_string(&path).await?;
    let request = parse_request(&raw)?;
    match &request {
        Request::Match { candidates, .. } => {
            info!("Match request: {} candidates (threshold {})", candidates.len(), cfg.match_threshold)
        }
        Request::Analyze { units, .. } => info!("Analyze request: {} units", units.len()),
    }

    let response = handle(&cfg, request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
