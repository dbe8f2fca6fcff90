use std::path::PathBuf;

use crate::domain::entities::breakout::BreakoutReport;
use crate::domain::error::DomainError;

/// Renders a non-empty ranked report and returns where it was written.
pub trait ReportSink: Send + Sync {
    fn render(&self, report: &BreakoutReport) -> Result<PathBuf, DomainError>;
}
