//! Loading real CSV files from disk through to a dashboard view.

use std::io::Write;
use std::path::Path;

use portfolio_dashboard::{load_csv, Dashboard, DashboardError, FilterSelection, Status, StyleConfig};
use tempfile::NamedTempFile;

const PORTFOLIO_CSV: &str = "\
Company,Status,Industry,Headquarters,Fund,Year of Investment
Accelya,Current,Transportation,\"Barcelona, Spain\",Perennial,2019
Beacon Analytics,Former,Technology,\"Austin, USA\",\"Flagship, Perennial\",2017
Cobalt Health,Current,Healthcare,\"Boston, USA\",Flagship,2021
Dune Energy,Former,Energy,\"Houston, USA\",Growth,
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_file_into_dashboard() {
    let file = write_csv(PORTFOLIO_CSV);
    let portfolio = load_csv(file.path()).unwrap();

    assert_eq!(portfolio.len(), 4);
    assert_eq!(portfolio.source, file.path().display().to_string());

    let dashboard = Dashboard::new(portfolio, StyleConfig::default());
    let view = dashboard.view();

    assert_eq!(view.summary.total_companies, 4);
    assert_eq!(view.summary.total_industries, 4);
    // Dune Energy has no year
    assert_eq!(view.timeline.len(), 3);
    assert_eq!(view.table.len(), 4);
    assert_eq!(view.table[0].headquarters, "Barcelona, Spain");
}

#[test]
fn filtered_view_from_file() {
    let file = write_csv(PORTFOLIO_CSV);
    let dashboard = Dashboard::new(load_csv(file.path()).unwrap(), StyleConfig::default());

    let selection = FilterSelection::from_values("Perennial", "all", "Current").unwrap();
    let view = dashboard.view_for(&selection);

    assert_eq!(view.table.len(), 1);
    assert_eq!(view.table[0].company, "Accelya");
    assert_eq!(view.table[0].status, Status::Current);
    assert_eq!(view.summary.total_exits, 0);
}

#[test]
fn missing_file_is_reported() {
    let err = load_csv(Path::new("/nonexistent/portfolio.csv")).unwrap_err();

    assert!(matches!(err, DashboardError::Csv { .. }));
    assert!(err.to_string().contains("/nonexistent/portfolio.csv"));
}

#[test]
fn invalid_row_reports_line_number() {
    let file = write_csv("Company,Status,Industry,Fund\nAccelya,Current,Transportation,Perennial\nBeacon,Current,,Flagship\n");
    let err = load_csv(file.path()).unwrap_err();

    match err {
        DashboardError::InvalidRecord { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("industry"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bundled_sample_data_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/portfolio.csv");
    let portfolio = load_csv(&path).unwrap();

    assert!(!portfolio.is_empty());
    assert!(portfolio.records.iter().all(|r| r.year().is_some()));
}
