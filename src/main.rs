// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;

use portfolio_dashboard::{load_csv, Dashboard, DashboardConfig, FilterSelection, ALL};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = DashboardConfig::from_env().context("Invalid configuration")?;

    match args.first().map(String::as_str) {
        Some("summary") => run_summary(&config, &args[1..]),
        Some("options") => run_options(&config),
        Some(other) => bail!("Unknown command '{}' (expected: summary, options)", other),
        None => run_ui_mode(&config),
    }
}

fn load_dashboard(config: &DashboardConfig) -> Result<Dashboard> {
    let portfolio = load_csv(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;
    let style = config.load_style().context("Failed to load style config")?;

    Ok(Dashboard::new(portfolio, style))
}

/// Parse `--fund X --industry Y --status Z` into a selection
fn parse_selection(args: &[String]) -> Result<FilterSelection> {
    let (mut fund, mut industry, mut status) = (ALL, ALL, ALL);

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("Missing value for {}", flag))?;

        match flag.as_str() {
            "--fund" => fund = value.as_str(),
            "--industry" => industry = value.as_str(),
            "--status" => status = value.as_str(),
            other => bail!("Unknown option '{}'", other),
        }
    }

    Ok(FilterSelection::from_values(fund, industry, status)?)
}

/// Print the dashboard view for a selection as JSON
fn run_summary(config: &DashboardConfig, args: &[String]) -> Result<()> {
    let selection = parse_selection(args)?;
    let dashboard = load_dashboard(config)?;

    let view = dashboard.view_for(&selection);
    log::info!(
        "{}: {} of {} companies",
        selection.describe(),
        view.summary.total_companies,
        dashboard.records().len()
    );

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Print the filter control values as JSON
fn run_options(config: &DashboardConfig) -> Result<()> {
    let dashboard = load_dashboard(config)?;
    println!("{}", serde_json::to_string_pretty(dashboard.options())?);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &DashboardConfig) -> Result<()> {
    let dashboard = load_dashboard(config)?;
    log::info!("Starting UI with {} companies (press 'q' to quit)", dashboard.records().len());

    let mut app = ui::App::new(dashboard);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &DashboardConfig) -> Result<()> {
    bail!("TUI mode not available; rebuild with --features tui, or run the portfolio-server binary with --features server")
}
