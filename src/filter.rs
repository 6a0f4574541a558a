// 🔎 Filter Engine - fund / industry / status selections → filtered record view

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::Result;
use crate::record::{Record, Status};

/// Control value meaning "no constraint"
pub const ALL: &str = "all";

/// Current filter choices; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub fund: Option<String>,
    pub industry: Option<String>,
    pub status: Option<Status>,
}

impl FilterSelection {
    /// Everything selected (dashboard start state)
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from raw control values, where "all" means no constraint
    pub fn from_values(fund: &str, industry: &str, status: &str) -> Result<Self> {
        let status = match status {
            ALL => None,
            other => Some(other.parse::<Status>()?),
        };

        Ok(FilterSelection {
            fund: choice(fund),
            industry: choice(industry),
            status,
        })
    }

    pub fn is_all(&self) -> bool {
        self.fund.is_none() && self.industry.is_none() && self.status.is_none()
    }

    /// Fund matches by substring containment on the raw fund list, so
    /// "Flagship" also matches a record listed under "Flagship II".
    pub fn matches(&self, record: &Record) -> bool {
        let fund_match = self
            .fund
            .as_deref()
            .map_or(true, |fund| record.fund.contains(fund));
        let industry_match = self
            .industry
            .as_deref()
            .map_or(true, |industry| record.industry == industry);
        let status_match = self.status.map_or(true, |status| record.status == status);

        fund_match && industry_match && status_match
    }

    /// Short label for status bars, e.g. "Fund: Flagship | Status: Current"
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(fund) = &self.fund {
            parts.push(format!("Fund: {}", fund));
        }
        if let Some(industry) = &self.industry {
            parts.push(format!("Industry: {}", industry));
        }
        if let Some(status) = self.status {
            parts.push(format!("Status: {}", status));
        }

        if parts.is_empty() {
            "All companies".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

fn choice(value: &str) -> Option<String> {
    if value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}

/// Records passing every criterion, in their original order
pub fn apply_filters(records: &[Record], selection: &FilterSelection) -> Vec<Record> {
    records
        .iter()
        .filter(|record| selection.matches(record))
        .cloned()
        .collect()
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// Values offered by the filter controls, taken from the full dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Individual fund names (multi-fund lists are split)
    pub funds: Vec<String>,
    pub industries: Vec<String>,
    pub statuses: Vec<Status>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record]) -> Self {
        let mut funds = BTreeSet::new();
        let mut industries = BTreeSet::new();

        for record in records {
            funds.extend(record.funds().map(str::to_string));
            industries.insert(record.industry.clone());
        }

        FilterOptions {
            funds: funds.into_iter().collect(),
            industries: industries.into_iter().collect(),
            statuses: Status::ALL.to_vec(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("Accelya", Status::Current, "Transportation", "Perennial", "2019"),
            Record::new("Beacon", Status::Former, "Tech", "Flagship, Perennial", "2017"),
            Record::new("Cobalt", Status::Current, "Tech", "Flagship II", "2021"),
            Record::new("Dune", Status::Former, "Energy", "Growth", ""),
        ]
    }

    fn companies(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.company.as_str()).collect()
    }

    #[test]
    fn test_all_selection_is_identity() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::all());

        assert_eq!(filtered, records);
    }

    #[test]
    fn test_fund_filter_uses_containment() {
        let records = sample();
        let selection = FilterSelection::from_values("Flagship", ALL, ALL).unwrap();

        let filtered = apply_filters(&records, &selection);
        assert_eq!(companies(&filtered), vec!["Beacon", "Cobalt"]);
    }

    #[test]
    fn test_industry_filter_is_exact() {
        let records = sample();
        let selection = FilterSelection::from_values(ALL, "Tech", ALL).unwrap();

        assert_eq!(companies(&apply_filters(&records, &selection)), vec!["Beacon", "Cobalt"]);

        let partial = FilterSelection::from_values(ALL, "Te", ALL).unwrap();
        assert!(apply_filters(&records, &partial).is_empty());
    }

    #[test]
    fn test_criteria_are_combined_with_and() {
        let records = sample();
        let selection = FilterSelection::from_values("Perennial", "Tech", "Former").unwrap();

        assert_eq!(companies(&apply_filters(&records, &selection)), vec!["Beacon"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let records = sample();
        let selection = FilterSelection::from_values("Growth", "Tech", ALL).unwrap();

        assert!(apply_filters(&records, &selection).is_empty());
    }

    #[test]
    fn test_invalid_status_value() {
        assert!(FilterSelection::from_values(ALL, ALL, "Exited").is_err());
    }

    #[test]
    fn test_from_values_all() {
        let selection = FilterSelection::from_values(ALL, ALL, ALL).unwrap();
        assert!(selection.is_all());
        assert_eq!(selection.describe(), "All companies");
    }

    #[test]
    fn test_describe() {
        let selection = FilterSelection::from_values("Flagship", ALL, "Current").unwrap();
        assert_eq!(selection.describe(), "Fund: Flagship | Status: Current");
    }

    #[test]
    fn test_filter_options_are_distinct_and_sorted() {
        let options = FilterOptions::from_records(&sample());

        assert_eq!(options.funds, vec!["Flagship", "Flagship II", "Growth", "Perennial"]);
        assert_eq!(options.industries, vec!["Energy", "Tech", "Transportation"]);
        assert_eq!(options.statuses, vec![Status::Current, Status::Former]);
    }
}
