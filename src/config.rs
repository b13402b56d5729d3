use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::aggregate::TOP_SUB_CATEGORIES;

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings.  Every field has a default, so a partial (or absent)
/// `dashboard.json` is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Sales CSV read at startup.
    pub data_path: PathBuf,
    /// File name suggested by the export dialog.
    pub export_file_name: String,
    /// Length of the sub-category profit leaderboard.
    pub top_sub_categories: usize,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data").join("Superstore.csv"),
            export_file_name: "sales_report.csv".to_string(),
            top_sub_categories: TOP_SUB_CATEGORIES,
            window_size: [1400.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Using settings from {}", path.display());
        Ok(config)
    }

    /// [`load`](Self::load), falling back to defaults (with a logged error)
    /// when the file is unreadable or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::error!("Ignoring settings file: {e:#}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.export_file_name, "sales_report.csv");
        assert_eq!(config.top_sub_categories, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_path": "/srv/sales.csv", "top_sub_categories": 5 }"#)
            .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/sales.csv"));
        assert_eq!(config.top_sub_categories, 5);
        assert_eq!(config.export_file_name, "sales_report.csv");
    }

    #[test]
    fn malformed_file_is_an_error_but_load_or_default_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "colour": "blue" }"#).unwrap();

        let err = DashboardConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());
    }
}
