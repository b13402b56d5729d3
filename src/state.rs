use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::export::to_csv_bytes;
use crate::data::filter::{FilterSelection, FilteredView};
use crate::data::model::{Dataset, Dimension};
use crate::data::report::{render_top, ViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    cache: DatasetCache,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Allowed values per filter dimension.
    pub selection: FilterSelection,

    /// KPIs and chart series for the current selection.
    pub view: ViewModel,

    pub region_colors: ColorMap,
    pub category_colors: ColorMap,

    /// Set when the last load failed; the dashboard shows only this.
    pub load_error: Option<String>,

    /// Transient message for the top bar (export results and the like).
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(config.data_path.clone()),
            config,
            dataset: None,
            selection: FilterSelection::default(),
            view: ViewModel::default(),
            region_colors: ColorMap::default(),
            category_colors: ColorMap::default(),
            load_error: None,
            status_message: None,
        }
    }

    pub fn data_path(&self) -> &Path {
        self.cache.path()
    }

    /// Fetch the dataset from the cache, loading it on first use.
    pub fn load(&mut self) {
        match self.cache.get() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.cache.path().display());
                self.dataset = None;
                self.view = ViewModel::default();
                self.load_error = Some(format!(
                    "Could not load {}: {e}",
                    self.cache.path().display()
                ));
            }
        }
    }

    /// Invalidate the cache and read the file again.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.load();
    }

    /// Switch to another CSV file.
    pub fn open(&mut self, path: PathBuf) {
        self.cache.set_path(path);
        self.load();
    }

    /// Ingest a loaded dataset: reset filters to "all" and recompute.
    fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = FilterSelection::all(&dataset);
        self.region_colors = ColorMap::new(dataset.distinct(Dimension::Region));
        self.category_colors = ColorMap::new(dataset.distinct(Dimension::Category));
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the view model after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.view = render_top(ds, &self.selection, self.config.top_sub_categories);
        }
    }

    pub fn toggle_filter_value(&mut self, dimension: Dimension, value: &str) {
        self.selection.toggle(dimension, value);
        self.refilter();
    }

    pub fn select_all(&mut self, dimension: Dimension) {
        if let Some(ds) = self.dataset.clone() {
            self.selection.select_all(dimension, &ds);
            self.refilter();
        }
    }

    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.select_none(dimension);
        self.refilter();
    }

    /// Write the rows currently on screen to `path`; returns the number of
    /// rows.  Uses the cached view, which `refilter` keeps in step with the
    /// selection.
    pub fn write_export(&self, path: &Path) -> Result<usize> {
        let dataset = self.dataset.as_ref().context("no dataset loaded")?;
        let view = FilteredView::from_indices(dataset, self.view.visible_indices.clone());
        let bytes = to_csv_bytes(&view).context("serialising filtered report")?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(view.len())
    }

    /// [`write_export`](Self::write_export), reporting the outcome in the
    /// status line.
    pub fn save_export(&mut self, path: &Path) {
        match self.write_export(path) {
            Ok(rows) => {
                log::info!("Exported {rows} orders to {}", path.display());
                self.status_message = Some(format!("Saved {rows} orders to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CSV: &str = "Region,Category,Segment,Sub-Category,Sales,Profit,Discount\n\
West,Furniture,Consumer,Chairs,100,10,0.1\n\
East,Furniture,Corporate,Tables,200,-20,0.2\n";

    fn state_with(dir: &tempfile::TempDir, contents: &str) -> AppState {
        let path = dir.path().join("Superstore.csv");
        fs::write(&path, contents).unwrap();
        let config = DashboardConfig {
            data_path: path,
            ..Default::default()
        };
        let mut state = AppState::new(config);
        state.load();
        state
    }

    #[test]
    fn load_selects_everything() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(&dir, CSV);

        assert!(state.load_error.is_none());
        assert_eq!(state.view.visible_indices, vec![0, 1]);
        assert_eq!(state.view.kpis.total_sales, 300.0);
        assert_eq!(state.selection.regions.len(), 2);
    }

    #[test]
    fn filter_changes_recompute_the_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, CSV);

        state.toggle_filter_value(Dimension::Region, "East");
        assert_eq!(state.view.kpis.total_orders, 1);
        assert_eq!(state.view.kpis.total_sales, 100.0);

        state.select_none(Dimension::Segment);
        assert!(state.view.is_empty());
        assert_eq!(state.view.kpis.avg_order_value, 0.0);

        state.select_all(Dimension::Segment);
        state.select_all(Dimension::Region);
        assert_eq!(state.view.kpis.total_orders, 2);
    }

    #[test]
    fn load_failure_blocks_the_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(&dir, "Region,Sales\nWest,1\n");

        assert!(state.dataset.is_none());
        assert!(state.view.is_empty());
        let msg = state.load_error.as_deref().unwrap();
        assert!(msg.contains("missing required column"));
    }

    #[test]
    fn reload_picks_up_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, CSV);
        fs::write(
            state.data_path(),
            format!("{CSV}South,Technology,Consumer,Phones,50,5,0\n"),
        )
        .unwrap();

        state.load();
        assert_eq!(state.view.kpis.total_orders, 2, "cached dataset reused");
        state.reload();
        assert_eq!(state.view.kpis.total_orders, 3);
    }

    #[test]
    fn export_writes_the_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, CSV);
        state.toggle_filter_value(Dimension::Region, "West");

        let out = dir.path().join("sales_report.csv");
        state.save_export(&out);
        assert!(state.status_message.as_deref().unwrap().starts_with("Saved 1 orders"));

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("East,Furniture,Corporate,Tables,200,-20,0.2,-0.1"));
        assert!(!text.contains("West,"));
    }

    #[test]
    fn export_matches_the_displayed_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, CSV);
        state.toggle_filter_value(Dimension::Region, "East");
        assert_eq!(state.view.visible_indices, vec![0]);

        // Selection edited without a refilter: the export still follows
        // what the dashboard shows.
        state.selection.select_none(Dimension::Region);

        let out = dir.path().join("sales_report.csv");
        let rows = state.write_export(&out).unwrap();
        assert_eq!(rows, state.view.visible_indices.len());

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("West,Furniture,Consumer,Chairs,100,10,0.1,0.1"));
        assert!(!text.contains("East,"));
    }

    #[test]
    fn export_without_dataset_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(DashboardConfig {
            data_path: dir.path().join("missing.csv"),
            ..Default::default()
        });
        state.load();
        assert!(state.load_error.is_some());

        state.save_export(&dir.path().join("out.csv"));
        assert_eq!(state.status_message.as_deref(), Some("Error: no dataset loaded"));
    }
}
