//! Report persistence.
//!
//! One JSON report per output path. A new scan replaces the file on disk,
//! and the report it replaces is handed back so the runner can show what
//! changed since the last scan. The engine itself persists nothing.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::types::{ScanReport, TradeUpError};

/// Write `report` to `path` through a sibling temp file, so a crash
/// mid-write never leaves a truncated report behind.
pub fn save_report(report: &ScanReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialise scan report")?;

    let tmp = temp_path(path);
    std::fs::write(&tmp, &json)
        .with_context(|| format!("Failed to write report to {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move report into place at {}", path.display()))?;

    debug!(
        path = %path.display(),
        scan_id = %report.scan_id,
        opportunities = report.opportunities.len(),
        "Report saved"
    );
    Ok(())
}

/// Read a saved report. `Ok(None)` when there is no file at `path`.
pub fn load_report(path: &Path) -> Result<Option<ScanReport>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No saved report");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read report from {}", path.display()))
        }
    };

    let report: ScanReport = serde_json::from_str(&json)
        .map_err(|e| TradeUpError::Storage(format!("{}: {e}", path.display())))?;

    info!(
        path = %path.display(),
        scan_id = %report.scan_id,
        generated_at = %report.generated_at,
        opportunities = report.opportunities.len(),
        "Previous report loaded"
    );
    Ok(Some(report))
}

/// Save `report` over whatever is at `path` and return the report it
/// replaced. An unreadable previous report is logged and treated as absent.
pub fn replace_report(report: &ScanReport, path: &Path) -> Result<Option<ScanReport>> {
    let previous = load_report(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring unreadable previous report");
        None
    });
    save_report(report, path)?;
    Ok(previous)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
