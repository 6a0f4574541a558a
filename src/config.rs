// Runtime configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};
use crate::style::StyleConfig;

pub const DEFAULT_DATA_PATH: &str = "data/portfolio.csv";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_WEB_DIR: &str = "web";

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV with the portfolio records (PORTFOLIO_DATA)
    pub data_path: PathBuf,

    /// Optional TOML style file (PORTFOLIO_STYLE)
    pub style_path: Option<PathBuf>,

    /// Server bind address (PORTFOLIO_ADDR)
    pub addr: SocketAddr,

    /// Static assets served under /static (PORTFOLIO_WEB_DIR)
    pub web_dir: PathBuf,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, so tests do not touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("PORTFOLIO_DATA").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let style_path = lookup("PORTFOLIO_STYLE").filter(|p| !p.trim().is_empty());
        let web_dir = lookup("PORTFOLIO_WEB_DIR").unwrap_or_else(|| DEFAULT_WEB_DIR.to_string());

        let addr_str = lookup("PORTFOLIO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_str.parse().map_err(|_| {
            DashboardError::InvalidConfig(format!("PORTFOLIO_ADDR '{}' is not a socket address", addr_str))
        })?;

        Ok(DashboardConfig {
            data_path: PathBuf::from(data_path),
            style_path: style_path.map(PathBuf::from),
            addr,
            web_dir: PathBuf::from(web_dir),
        })
    }

    /// Style file if configured, built-in defaults otherwise
    pub fn load_style(&self) -> Result<StyleConfig> {
        match &self.style_path {
            Some(path) => {
                log::info!("Loading styles from {}", path.display());
                StyleConfig::from_file(path)
            }
            None => Ok(StyleConfig::default()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
