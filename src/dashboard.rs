// Dashboard state and the display-ready view derived from it
//
// Control flow on every filter change:
//   selection → apply_filters → aggregator → DashboardView → renderers
//
// The records never change after load. The only mutable state is the
// current FilterSelection.

use serde::Serialize;

use crate::aggregator::{
    compute_fund_counts, compute_industry_counts, compute_summary_stats,
    compute_timeline_layout, sorted_counts, timeline_height, SummaryStats,
};
use crate::filter::{apply_filters, FilterOptions, FilterSelection};
use crate::loader::Portfolio;
use crate::record::{Record, Status};
use crate::style::StyleConfig;

// ============================================================================
// VIEW TYPES
// ============================================================================

/// One slice/bar of a distribution chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValue {
    pub label: String,
    pub value: usize,
    pub color: String,
}

/// One timeline marker with its style hints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMarker {
    pub x: f64,
    pub y: String,
    pub year: i32,
    pub group: String,
    pub fund: String,
    pub industry: String,
    pub status: Status,
    pub color: String,
    pub symbol: String,

    /// Company, fund list and industry, one per line
    pub hover: String,
}

/// One table row, record fields unchanged plus the status badge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub company: String,
    pub status: Status,
    pub badge: String,
    pub industry: String,
    pub fund: String,
    pub year_of_investment: String,
    pub headquarters: String,
}

/// Everything the renderers need for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: FilterSelection,
    pub summary: SummaryStats,
    pub fund_distribution: Vec<CategoryValue>,
    pub industry_distribution: Vec<CategoryValue>,
    pub timeline: Vec<TimelineMarker>,
    pub timeline_height: u32,
    pub table: Vec<TableRow>,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

// ============================================================================
// DASHBOARD STATE
// ============================================================================

pub struct Dashboard {
    portfolio: Portfolio,
    options: FilterOptions,
    style: StyleConfig,
    selection: FilterSelection,
}

impl Dashboard {
    pub fn new(portfolio: Portfolio, style: StyleConfig) -> Self {
        let options = FilterOptions::from_records(&portfolio.records);

        Dashboard {
            portfolio,
            options,
            style,
            selection: FilterSelection::all(),
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn records(&self) -> &[Record] {
        &self.portfolio.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        log::debug!("Filter selection changed: {}", selection.describe());
        self.selection = selection;
    }

    pub fn select_fund(&mut self, fund: Option<String>) {
        let selection = FilterSelection { fund, ..self.selection.clone() };
        self.set_selection(selection);
    }

    pub fn select_industry(&mut self, industry: Option<String>) {
        let selection = FilterSelection { industry, ..self.selection.clone() };
        self.set_selection(selection);
    }

    pub fn select_status(&mut self, status: Option<Status>) {
        let selection = FilterSelection { status, ..self.selection.clone() };
        self.set_selection(selection);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(FilterSelection::all());
    }

    /// Records passing the current selection
    pub fn filtered(&self) -> Vec<Record> {
        apply_filters(&self.portfolio.records, &self.selection)
    }

    /// View for the current selection
    pub fn view(&self) -> DashboardView {
        build_view(&self.filtered(), &self.selection, &self.style)
    }

    /// View for an arbitrary selection; does not touch dashboard state
    pub fn view_for(&self, selection: &FilterSelection) -> DashboardView {
        let filtered = apply_filters(&self.portfolio.records, selection);
        build_view(&filtered, selection, &self.style)
    }
}

fn build_view(records: &[Record], selection: &FilterSelection, style: &StyleConfig) -> DashboardView {
    let fund_distribution = sorted_counts(&compute_fund_counts(records))
        .into_iter()
        .map(|(label, value)| CategoryValue {
            color: style.fund_color(&label).to_string(),
            label,
            value,
        })
        .collect();

    // industries share one color, the current-status accent
    let industry_distribution = sorted_counts(&compute_industry_counts(records))
        .into_iter()
        .map(|(label, value)| CategoryValue {
            label,
            value,
            color: style.current.color.clone(),
        })
        .collect();

    let points = compute_timeline_layout(records);
    let height = timeline_height(&points);
    let timeline = points
        .into_iter()
        .map(|point| {
            let status_style = style.status_style(point.status);
            let hover = format!("{}\nFund: {}\nIndustry: {}", point.company, point.fund, point.industry);
            TimelineMarker {
                x: point.x,
                y: point.company,
                year: point.year,
                group: point.group,
                fund: point.fund,
                industry: point.industry,
                status: point.status,
                color: status_style.color.clone(),
                symbol: status_style.symbol.clone(),
                hover,
            }
        })
        .collect();

    let table = records
        .iter()
        .map(|record| TableRow {
            company: record.company.clone(),
            status: record.status,
            badge: style.status_style(record.status).badge.clone(),
            industry: record.industry.clone(),
            fund: record.fund.clone(),
            year_of_investment: record.year_of_investment.clone(),
            headquarters: record.headquarters.clone(),
        })
        .collect();

    DashboardView {
        selection: selection.clone(),
        summary: compute_summary_stats(records),
        fund_distribution,
        industry_distribution,
        timeline,
        timeline_height: height,
        table,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        let records = vec![
            Record::new("Accelya", Status::Current, "Transportation", "Perennial", "2019")
                .with_headquarters("Barcelona, Spain"),
            Record::new("Beacon", Status::Former, "Tech", "Flagship, Perennial", "2019"),
            Record::new("Cobalt", Status::Current, "Tech", "Flagship", "2021"),
            Record::new("Dune", Status::Former, "Energy", "Growth", ""),
        ];
        Dashboard::new(Portfolio::from_records(records, "test"), StyleConfig::default())
    }

    #[test]
    fn test_initial_view_covers_everything() {
        let dashboard = dashboard();
        let view = dashboard.view();

        assert!(dashboard.selection().is_all());
        assert_eq!(view.summary.total_companies, 4);
        assert_eq!(view.summary.current_companies, 2);
        assert_eq!(view.summary.total_exits, 2);
        assert_eq!(view.summary.total_industries, 3);
        assert_eq!(view.table.len(), 4);
        assert_eq!(view.timeline.len(), 3);
        assert_eq!(view.timeline_height, 400);
    }

    #[test]
    fn test_fund_distribution_sorted_with_colors() {
        let view = dashboard().view();

        let labels: Vec<(&str, usize)> = view
            .fund_distribution
            .iter()
            .map(|c| (c.label.as_str(), c.value))
            .collect();
        assert_eq!(labels, vec![("Flagship", 2), ("Perennial", 2), ("Growth", 1)]);

        assert_eq!(view.fund_distribution[0].color, "#003366");
        assert_eq!(view.fund_distribution[2].color, crate::style::DEFAULT_FUND_COLOR);
    }

    #[test]
    fn test_selection_change_recomputes_everything() {
        let mut dashboard = dashboard();
        dashboard.select_industry(Some("Tech".to_string()));
        let view = dashboard.view();

        assert_eq!(view.summary.total_companies, 2);
        assert_eq!(view.summary.total_industries, 1);
        assert_eq!(view.industry_distribution.len(), 1);
        assert_eq!(view.industry_distribution[0].value, 2);
        assert_eq!(view.table.iter().map(|r| r.company.as_str()).collect::<Vec<_>>(), vec!["Beacon", "Cobalt"]);

        dashboard.select_status(Some(Status::Current));
        let view = dashboard.view();
        assert_eq!(view.summary.total_companies, 1);
        assert_eq!(view.table[0].company, "Cobalt");

        dashboard.clear_selection();
        assert_eq!(dashboard.view().summary.total_companies, 4);
    }

    #[test]
    fn test_empty_selection_renders_empty_view() {
        let mut dashboard = dashboard();
        dashboard.select_fund(Some("Nonexistent".to_string()));
        let view = dashboard.view();

        assert!(view.is_empty());
        assert_eq!(view.summary, SummaryStats::default());
        assert!(view.fund_distribution.is_empty());
        assert!(view.timeline.is_empty());
        assert_eq!(view.timeline_height, 400);
    }

    #[test]
    fn test_view_for_does_not_change_state() {
        let dashboard = dashboard();
        let selection = FilterSelection::from_values("Growth", "all", "all").unwrap();

        let view = dashboard.view_for(&selection);
        assert_eq!(view.table.len(), 1);
        assert!(dashboard.selection().is_all());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut dashboard = dashboard();
        dashboard.select_fund(Some("Perennial".to_string()));

        assert_eq!(dashboard.view(), dashboard.view());
    }

    #[test]
    fn test_status_style_hints() {
        let view = dashboard().view();

        let accelya = view.table.iter().find(|r| r.company == "Accelya").unwrap();
        assert_eq!(accelya.badge, "bg-success");
        assert_eq!(accelya.headquarters, "Barcelona, Spain");

        let beacon = view.timeline.iter().find(|m| m.y == "Beacon").unwrap();
        assert_eq!(beacon.symbol, "diamond");
        assert_eq!(beacon.color, "#999999");
        assert_eq!(beacon.hover, "Beacon\nFund: Flagship, Perennial\nIndustry: Tech");
    }

    #[test]
    fn test_options_come_from_full_dataset() {
        let mut dashboard = dashboard();
        dashboard.select_fund(Some("Growth".to_string()));

        assert_eq!(dashboard.options().funds, vec!["Flagship", "Growth", "Perennial"]);
        assert_eq!(dashboard.filtered().len(), 1);
        assert_eq!(dashboard.view().table.len(), 1);
    }
}
