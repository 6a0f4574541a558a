// 🎨 Display styles - fund colors and status hints, loaded from TOML
//
// Example style file:
//
//   default_fund_color = "#6c757d"
//
//   [fund_colors]
//   Flagship = "#003366"
//   Perennial = "#0066cc"
//
//   [former]
//   color = "#999999"
//   symbol = "diamond"
//   badge = "bg-secondary"

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::record::Status;

/// Color used for funds missing from `fund_colors`
pub const DEFAULT_FUND_COLOR: &str = "#6c757d";

/// Marker and badge hints for one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStyle {
    pub color: String,
    pub symbol: String,
    pub badge: String,
}

impl StatusStyle {
    fn current() -> Self {
        StatusStyle {
            color: "#003366".to_string(),
            symbol: "circle".to_string(),
            badge: "bg-success".to_string(),
        }
    }

    fn former() -> Self {
        StatusStyle {
            color: "#999999".to_string(),
            symbol: "diamond".to_string(),
            badge: "bg-secondary".to_string(),
        }
    }
}

/// Missing keys fall back to `StyleConfig::default()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub fund_colors: HashMap<String, String>,
    pub default_fund_color: String,
    pub current: StatusStyle,
    pub former: StatusStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let fund_colors = [
            ("Flagship", "#003366"),
            ("Perennial", "#0066cc"),
        ]
        .into_iter()
        .map(|(fund, color)| (fund.to_string(), color.to_string()))
        .collect();

        StyleConfig {
            fund_colors,
            default_fund_color: DEFAULT_FUND_COLOR.to_string(),
            current: StatusStyle::current(),
            former: StatusStyle::former(),
        }
    }
}

impl StyleConfig {
    /// Load styles from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|source| DashboardError::ConfigRead {
            path: path_str.clone(),
            source,
        })?;

        let config = Self::from_toml_str(&content).map_err(|source| DashboardError::ConfigParse {
            path: path_str,
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Every configured color must be a #rrggbb hex value
    pub fn validate(&self) -> Result<()> {
        let colors = self
            .fund_colors
            .values()
            .chain([&self.default_fund_color, &self.current.color, &self.former.color]);

        for color in colors {
            if parse_hex_color(color).is_none() {
                return Err(DashboardError::InvalidConfig(format!(
                    "color '{}' is not a #rrggbb value",
                    color
                )));
            }
        }

        Ok(())
    }

    pub fn fund_color(&self, fund: &str) -> &str {
        self.fund_colors
            .get(fund)
            .map(String::as_str)
            .unwrap_or(self.default_fund_color.as_str())
    }

    pub fn status_style(&self, status: Status) -> &StatusStyle {
        match status {
            Status::Current => &self.current,
            Status::Former => &self.former,
        }
    }
}

/// "#rrggbb" → (r, g, b)
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

// ============================================================================
// TESTS
// ============================================================================
