// 📊 Aggregator - record collection → chart-ready counts, stats and timeline layout
//
// Every function here is pure: same records in, same output out.
// Nothing is cached; callers recompute on every filter change.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::record::{Record, Status};

/// Horizontal span shared by the points of one timeline year-group
pub const JITTER_SPAN: f64 = 0.3;

/// Minimum timeline height, and height per plotted company
pub const TIMELINE_MIN_HEIGHT: u32 = 400;
pub const TIMELINE_ROW_HEIGHT: u32 = 25;

/// Category name → number of records
pub type CategoryCounts = HashMap<String, usize>;

// ============================================================================
// DISTRIBUTIONS
// ============================================================================

/// Records per fund; a multi-fund record counts once for each of its funds
pub fn compute_fund_counts(records: &[Record]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();

    for record in records {
        for fund in record.funds() {
            *counts.entry(fund.to_string()).or_insert(0) += 1;
        }
    }

    counts
}

/// Records per industry
pub fn compute_industry_counts(records: &[Record]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();

    for record in records {
        *counts.entry(record.industry.clone()).or_insert(0) += 1;
    }

    counts
}

/// Display order for a distribution: largest first, ties by name
pub fn sorted_counts(counts: &CategoryCounts) -> Vec<(String, usize)> {
    let mut result: Vec<_> = counts
        .iter()
        .map(|(name, count)| (name.clone(), *count))
        .collect();

    result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    result
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_companies: usize,
    pub current_companies: usize,
    pub total_exits: usize,

    /// Distinct industries present in the records
    pub total_industries: usize,
}

pub fn compute_summary_stats(records: &[Record]) -> SummaryStats {
    let industries: HashSet<&str> = records.iter().map(|r| r.industry.as_str()).collect();

    SummaryStats {
        total_companies: records.len(),
        current_companies: records.iter().filter(|r| r.is_current()).count(),
        total_exits: records.iter().filter(|r| !r.is_current()).count(),
        total_industries: industries.len(),
    }
}

// ============================================================================
// TIMELINE
// ============================================================================

/// One plotted company on the investment timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Year + jitter offset
    pub x: f64,
    pub year: i32,
    pub offset: f64,

    /// Company name (y axis)
    pub company: String,

    /// Raw fund list as loaded
    pub fund: String,

    /// Jitter group (primary fund)
    pub group: String,

    pub industry: String,
    pub status: Status,
}

/// Company ordering for the timeline: case-insensitive, raw string breaks ties
pub fn compare_company_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Offset of member `index` in a year-group of `group_len` points.
///
/// Members are spread evenly across `span`, centred on the true year. A group
/// of one sits exactly on the year.
pub fn jitter_offset(index: usize, group_len: usize, span: f64) -> f64 {
    if group_len <= 1 {
        return 0.0;
    }

    let last = (group_len - 1) as f64;
    (index as f64 - last / 2.0) * (span / last)
}

/// Timeline layout for records with a valid year.
///
/// Output is sorted by year, then company name. Records sharing a primary fund
/// and a year are jittered apart in that order.
pub fn compute_timeline_layout(records: &[Record]) -> Vec<TimelinePoint> {
    let mut dated: Vec<(i32, &Record)> = records
        .iter()
        .filter_map(|r| r.year().map(|year| (year, r)))
        .collect();

    // sort_by is stable, equal keys keep input order
    dated.sort_by(|(year_a, a), (year_b, b)| {
        year_a
            .cmp(year_b)
            .then_with(|| compare_company_names(&a.company, &b.company))
    });

    let mut groups: HashMap<(&str, i32), Vec<usize>> = HashMap::new();
    for (idx, (year, record)) in dated.iter().enumerate() {
        groups
            .entry((record.primary_fund(), *year))
            .or_default()
            .push(idx);
    }

    let mut offsets = vec![0.0; dated.len()];
    for members in groups.values() {
        for (i, &idx) in members.iter().enumerate() {
            offsets[idx] = jitter_offset(i, members.len(), JITTER_SPAN);
        }
    }

    dated
        .into_iter()
        .zip(offsets)
        .map(|((year, record), offset)| TimelinePoint {
            x: year as f64 + offset,
            year,
            offset,
            company: record.company.clone(),
            fund: record.fund.clone(),
            group: record.primary_fund().to_string(),
            industry: record.industry.clone(),
            status: record.status,
        })
        .collect()
}

/// Chart height hint: grows with the number of plotted companies
pub fn timeline_height(points: &[TimelinePoint]) -> u32 {
    let rows = u32::try_from(points.len()).unwrap_or(u32::MAX);
    TIMELINE_MIN_HEIGHT.max(rows.saturating_mul(TIMELINE_ROW_HEIGHT))
}

// ============================================================================
// TESTS
// ============================================================================
