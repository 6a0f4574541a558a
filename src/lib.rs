// Portfolio Dashboard - Core Library
// Exposes all modules for use in the TUI, the API server, and tests

pub mod error;
pub mod record;
pub mod loader;
pub mod aggregator;  // Fund / industry distributions, summary, timeline jitter
pub mod filter;      // Fund / industry / status selection
pub mod style;
pub mod config;
pub mod dashboard;   // Application state + display-ready view

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use record::{Record, Status, FUND_SEPARATOR};
pub use loader::{load_csv, load_csv_from_reader, Portfolio};
pub use aggregator::{
    compute_fund_counts, compute_industry_counts, compute_summary_stats,
    compute_timeline_layout, jitter_offset, sorted_counts, timeline_height,
    CategoryCounts, SummaryStats, TimelinePoint, JITTER_SPAN,
};
pub use filter::{apply_filters, FilterOptions, FilterSelection, ALL};
pub use style::{StatusStyle, StyleConfig, DEFAULT_FUND_COLOR};
pub use config::DashboardConfig;
pub use dashboard::{CategoryValue, Dashboard, DashboardView, TableRow, TimelineMarker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
