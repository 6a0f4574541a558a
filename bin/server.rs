// Portfolio Dashboard - Web Server
// Serves the dashboard JSON API and the static page over a read-only dataset

use anyhow::{Context, Result};
use std::sync::Arc;

use portfolio_dashboard::{api, load_csv, Dashboard, DashboardConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_env().context("Invalid configuration")?;

    // Load the dataset once; it is never mutated afterwards
    let portfolio = load_csv(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;
    let style = config.load_style().context("Failed to load style config")?;
    let dashboard = Arc::new(Dashboard::new(portfolio, style));

    let app = api::router(dashboard, &config.web_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    log::info!("Server running on http://{}", config.addr);
    log::info!("API: http://{}/api/dashboard", config.addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
