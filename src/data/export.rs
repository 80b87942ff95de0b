use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::aggregate::Summary;
use super::filter::FilterCriteria;

/// JSON document written by "Export summary…".
#[derive(Debug, Serialize)]
pub struct SummaryExport<'a> {
    pub source: Option<&'a Path>,
    pub filters: &'a FilterCriteria,
    #[serde(flatten)]
    pub summary: &'a Summary,
}

/// Serialize the current view's aggregates to pretty-printed JSON.
pub fn export_summary(path: &Path, export: &SummaryExport<'_>) -> Result<()> {
    let text = serde_json::to_string_pretty(export).context("serializing summary")?;
    std::fs::write(path, text)
        .with_context(|| format!("writing summary to {}", path.display()))?;
    log::info!("Exported summary to {}", path.display());
    Ok(())
}
