// Portfolio records - one row per portfolio company

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Separator between fund names in the `Fund` column
pub const FUND_SEPARATOR: &str = ", ";

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    /// Still held in the portfolio
    Current,

    /// Exited investment
    Former,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Current, Status::Former];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Current => "Current",
            Status::Former => "Former",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DashboardError;

    /// Exact, case-sensitive match on the enumeration names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Current" => Ok(Status::Current),
            "Former" => Ok(Status::Former),
            other => Err(DashboardError::InvalidSelection {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// Portfolio company entry, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Company")]
    pub company: String,

    #[serde(rename = "Status")]
    pub status: Status,

    #[serde(rename = "Industry")]
    pub industry: String,

    /// Display only, never aggregated
    #[serde(rename = "Headquarters", default)]
    pub headquarters: String,

    /// One or more fund names joined by ", "
    #[serde(rename = "Fund")]
    pub fund: String,

    /// 4-digit year, may be empty
    #[serde(rename = "Year of Investment", default)]
    pub year_of_investment: String,
}

impl Record {
    pub fn new(
        company: impl Into<String>,
        status: Status,
        industry: impl Into<String>,
        fund: impl Into<String>,
        year_of_investment: impl Into<String>,
    ) -> Self {
        Record {
            company: company.into(),
            status,
            industry: industry.into(),
            headquarters: String::new(),
            fund: fund.into(),
            year_of_investment: year_of_investment.into(),
        }
    }

    /// Builder pattern: add headquarters
    pub fn with_headquarters(mut self, headquarters: impl Into<String>) -> Self {
        self.headquarters = headquarters.into();
        self
    }

    /// Individual fund names, in listed order
    pub fn funds(&self) -> impl Iterator<Item = &str> {
        self.fund.split(FUND_SEPARATOR)
    }

    /// First listed fund
    pub fn primary_fund(&self) -> &str {
        self.funds().next().unwrap_or_default()
    }

    /// Investment year, None unless exactly 4 ASCII digits
    pub fn year(&self) -> Option<i32> {
        let year = self.year_of_investment.trim();
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        year.parse().ok()
    }

    pub fn is_current(&self) -> bool {
        self.status == Status::Current
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funds_split_on_separator() {
        let record = Record::new("Accelya", Status::Current, "Transportation", "Flagship, Perennial", "2019");

        let funds: Vec<&str> = record.funds().collect();
        assert_eq!(funds, vec!["Flagship", "Perennial"]);
        assert_eq!(record.primary_fund(), "Flagship");
    }

    #[test]
    fn test_single_fund() {
        let record = Record::new("Accelya", Status::Current, "Transportation", "Perennial", "2019");

        assert_eq!(record.funds().count(), 1);
        assert_eq!(record.primary_fund(), "Perennial");
    }

    #[test]
    fn test_year_parsing() {
        let mut record = Record::new("A", Status::Former, "Tech", "Flagship", "2019");
        assert_eq!(record.year(), Some(2019));

        record.year_of_investment = " 2021 ".to_string();
        assert_eq!(record.year(), Some(2021));

        record.year_of_investment = String::new();
        assert_eq!(record.year(), None);

        record.year_of_investment = "n/a".to_string();
        assert_eq!(record.year(), None);

        for malformed in ["20190", "+2019", "-1", "219", "2147483647", "２０１９"] {
            record.year_of_investment = malformed.to_string();
            assert_eq!(record.year(), None, "{malformed}");
        }
    }

    #[test]
    fn test_status_from_str_is_exact() {
        assert_eq!("Current".parse::<Status>().unwrap(), Status::Current);
        assert_eq!("Former".parse::<Status>().unwrap(), Status::Former);
        assert!("current".parse::<Status>().is_err());
        assert!("Exited".parse::<Status>().is_err());
    }

    #[test]
    fn test_with_headquarters() {
        let record = Record::new("Accelya", Status::Current, "Transportation", "Perennial", "2019")
            .with_headquarters("Barcelona, Spain");

        assert_eq!(record.headquarters, "Barcelona, Spain");
        assert!(record.is_current());
    }
}
