//! Scan configuration: built once at startup from defaults, environment
//! variables and CLI flags, then handed to each component.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::breakout::DEFAULT_THRESHOLD_MULTIPLE;
use crate::application::calendar::{recent_trading_days, MAX_LOOKBACK_DAYS};
use crate::domain::error::DomainError;
use crate::domain::values::trading_day::TradingDay;
use crate::infrastructure::feeds::nse_bhavdata::BHAVDATA_BASE_URL;
use crate::infrastructure::feeds::nse_universe::NIFTY_500_URL;
use crate::infrastructure::report::csv_report::TRADINGVIEW_CHART_BASE;

pub const DEFAULT_DATA_DIR: &str = "data/nse/delivery";
pub const DEFAULT_LOOKBACK_DAYS: usize = 30;
pub const NSE_LANDING_URL: &str = "https://www.nseindia.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root folder; cache and reports live underneath it.
    pub data_dir: PathBuf,
    /// Trading days in the trailing window, the spike day included.
    pub lookback_days: usize,
    pub threshold_multiple: f64,
    /// Pause after the priming request and after every downloaded day.
    pub request_delay_ms: u64,
    /// Render report symbols as chart links.
    pub hyperlinks: bool,
    pub landing_url: String,
    pub universe_url: String,
    pub bhavdata_base_url: String,
    pub chart_url_base: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            threshold_multiple: DEFAULT_THRESHOLD_MULTIPLE,
            request_delay_ms: 1000,
            hyperlinks: true,
            landing_url: NSE_LANDING_URL.into(),
            universe_url: NIFTY_500_URL.into(),
            bhavdata_base_url: BHAVDATA_BASE_URL.into(),
            chart_url_base: TRADINGVIEW_CHART_BASE.into(),
        }
    }
}

impl ScanConfig {
    /// Defaults overridden by `DELIVERYSCAN_*` environment variables.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let mut cfg = Self::default();

        if let Some(dir) = lookup("DELIVERYSCAN_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("DELIVERYSCAN_LOOKBACK") {
            cfg.lookback_days = parse_env(&raw, "DELIVERYSCAN_LOOKBACK")?;
        }
        if let Some(raw) = lookup("DELIVERYSCAN_THRESHOLD") {
            cfg.threshold_multiple = parse_env(&raw, "DELIVERYSCAN_THRESHOLD")?;
        }
        if let Some(raw) = lookup("DELIVERYSCAN_REQUEST_DELAY_MS") {
            cfg.request_delay_ms = parse_env(&raw, "DELIVERYSCAN_REQUEST_DELAY_MS")?;
        }
        if let Some(raw) = lookup("DELIVERYSCAN_HYPERLINKS") {
            let lowered = raw.trim().to_ascii_lowercase();
            cfg.hyperlinks = !matches!(lowered.as_str(), "0" | "false" | "no" | "off");
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut issues: Vec<String> = Vec::new();
        if self.lookback_days == 0 {
            issues.push("lookback_days must be >= 1".into());
        }
        if self.lookback_days > MAX_LOOKBACK_DAYS {
            issues.push(format!("lookback_days must be <= {MAX_LOOKBACK_DAYS}"));
        }
        if self.threshold_multiple.is_nan() || self.threshold_multiple <= 0.0 {
            issues.push("threshold_multiple must be > 0".into());
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidInput(issues.join("; ")))
        }
    }

    /// The lookback window ending before `reference`. Touches nothing on disk.
    pub fn trading_days(&self, reference: NaiveDate) -> Result<Vec<TradingDay>, DomainError> {
        self.validate()?;
        Ok(recent_trading_days(self.lookback_days, reference))
    }

    /// Per-day record cache: `{data_dir}/daily_logs`.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("daily_logs")
    }

    /// Reports: `{data_dir}/daily_output`.
    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join("daily_output")
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn chart_link_base(&self) -> Option<String> {
        self.hyperlinks.then(|| self.chart_url_base.clone())
    }

    pub fn ensure_dirs(&self) -> Result<(), DomainError> {
        for dir in [self.log_dir(), self.output_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|e| DomainError::Cache(format!("create {}: {e}", dir.display())))?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::InvalidInput(format!("{name} has invalid value '{raw}'")))
}
