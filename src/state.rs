use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::CompanyColors;
use crate::data::aggregate::{map_points, table_rows, MapPoint, Summary, TableRow};
use crate::data::cache::DatasetCache;
use crate::data::export::SummaryExport;
use crate::data::filter::{filtered_indices, valid_indices, FilterCriteria};
use crate::data::model::Dataset;

/// The multi-select controls in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Company,
    Continent,
    Country,
}

impl FilterColumn {
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Company => "Companies",
            FilterColumn::Continent => "Continents",
            FilterColumn::Country => "Countries",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    cache: DatasetCache,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// Current sidebar selection.
    pub criteria: FilterCriteria,

    /// Records passing `criteria` (sentinel years included).
    pub filtered: Vec<usize>,

    /// `filtered` restricted to known opening years.
    pub valid: Vec<usize>,

    pub summary: Summary,
    pub map_points: Vec<MapPoint>,
    pub table_rows: Vec<TableRow>,

    pub colors: CompanyColors,

    /// Set by every control change; cleared by [`AppState::refresh`].
    dirty: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load (or fetch from cache) the table at `path`.
    pub fn open(&mut self, path: &Path) {
        match self.cache.get(path) {
            Ok(dataset) => {
                self.set_dataset(dataset);
                self.status_message = None;
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-open the current file; a no-op read if it has not changed.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path() {
            self.open(&path);
        }
    }

    pub fn source_path(&self) -> Option<PathBuf> {
        self.cache.path().map(Path::to_path_buf)
    }

    /// Install a snapshot. A different snapshot resets the filters.
    fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        let unchanged = self
            .dataset
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &dataset));
        if unchanged {
            return;
        }

        self.criteria = FilterCriteria::from_dataset(&dataset);
        self.colors = CompanyColors::new(&dataset.companies);
        self.dataset = Some(dataset);
        self.recompute();
    }

    /// Re-derive the view and every aggregate from scratch.
    pub fn recompute(&mut self) {
        self.dirty = false;
        let Some(ds) = &self.dataset else {
            return;
        };

        self.filtered = filtered_indices(ds, &self.criteria);
        self.valid = valid_indices(ds, &self.filtered);
        self.summary = Summary::compute(ds, &self.valid);
        self.map_points = map_points(ds, &self.valid);
        self.table_rows = table_rows(ds, &self.valid);

        log::debug!(
            "recomputed view: {} filtered, {} with known year",
            self.filtered.len(),
            self.valid.len()
        );
    }

    /// Recompute once if any control changed since the last call.
    ///
    /// Returns `true` when the derived view changed, so panels drawn earlier
    /// in the frame are stale.
    pub fn refresh(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.recompute();
        true
    }

    pub fn selection(&self, column: FilterColumn) -> &BTreeSet<String> {
        match column {
            FilterColumn::Company => &self.criteria.companies,
            FilterColumn::Continent => &self.criteria.continents,
            FilterColumn::Country => &self.criteria.countries,
        }
    }

    fn selection_mut(&mut self, column: FilterColumn) -> &mut BTreeSet<String> {
        self.dirty = true;
        match column {
            FilterColumn::Company => &mut self.criteria.companies,
            FilterColumn::Continent => &mut self.criteria.continents,
            FilterColumn::Country => &mut self.criteria.countries,
        }
    }

    /// Every selectable value for a control, in dataset order.
    pub fn options(&self, column: FilterColumn) -> &[String] {
        match (&self.dataset, column) {
            (None, _) => &[],
            (Some(ds), FilterColumn::Company) => &ds.companies,
            (Some(ds), FilterColumn::Continent) => &ds.continents,
            (Some(ds), FilterColumn::Country) => &ds.countries,
        }
    }

    /// Toggle a single value in one of the multi-selects.
    pub fn toggle(&mut self, column: FilterColumn, value: &str) {
        let selected = self.selection_mut(column);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Select every option of a control.
    pub fn select_all(&mut self, column: FilterColumn) {
        let all: BTreeSet<String> = self.options(column).iter().cloned().collect();
        *self.selection_mut(column) = all;
    }

    /// Deselect everything. For companies this hides all rows; for the other
    /// controls it lifts the restriction.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.selection_mut(column).clear();
    }

    /// Set the inclusive year range, clamped to the observed bounds.
    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        let (min, max) = self.year_bounds();
        let lo = lo.clamp(min, max);
        let hi = hi.clamp(lo, max);
        if self.criteria.year_range != (lo, hi) {
            self.criteria.year_range = (lo, hi);
            self.dirty = true;
        }
    }

    /// Observed (min, max) opened year of the loaded dataset.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.dataset
            .as_ref()
            .and_then(|ds| ds.year_bounds)
            .unwrap_or((0, 0))
    }

    /// Back to the initial selection.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::from_dataset(ds);
            self.dirty = true;
        }
    }

    pub fn summary_export(&self) -> SummaryExport<'_> {
        SummaryExport {
            source: self.cache.path(),
            filters: &self.criteria,
            summary: &self.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Company,Country,Continent,City,Location,Latitude,Longitude,Opened
CompanyA,USA,NorthAmerica,Ashburn,Loudoun,39.0,-77.5,2010-04-01
CompanyB,USA,NorthAmerica,Quincy,Grant County,47.2,-119.8,not yet
CompanyA,Germany,Europe,Frankfurt,Hanau,50.1,8.7,2015-11-20
";

    fn loaded() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined_data.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut state = AppState::default();
        state.open(&path);
        (dir, state)
    }

    #[test]
    fn opening_applies_default_filters() {
        let (_dir, state) = loaded();
        assert!(state.status_message.is_none());
        assert_eq!(state.criteria.year_range, (0, 2015));
        assert_eq!(state.filtered, vec![0, 1, 2]);
        assert_eq!(state.valid, vec![0, 2]);
        assert_eq!(state.summary.total_locations, 2);
        assert_eq!(state.map_points.len(), 2);
        assert_eq!(state.table_rows[1].city, "Frankfurt");
    }

    #[test]
    fn control_changes_apply_on_refresh() {
        let (_dir, mut state) = loaded();

        assert!(!state.refresh());
        state.toggle(FilterColumn::Continent, "Europe");
        assert_eq!(state.summary.total_locations, 2);
        assert!(state.refresh());
        assert_eq!(state.valid, vec![2]);
        assert!(!state.refresh());

        state.select_none(FilterColumn::Continent);
        state.select_none(FilterColumn::Company);
        state.refresh();
        assert!(state.filtered.is_empty());
        assert_eq!(state.summary, Summary::default());

        state.select_all(FilterColumn::Company);
        state.set_year_range(2011, 2030);
        state.refresh();
        assert_eq!(state.criteria.year_range, (2011, 2015));
        assert_eq!(state.filtered, vec![2]);

        state.reset_filters();
        state.refresh();
        assert_eq!(state.filtered, vec![0, 1, 2]);
    }

    #[test]
    fn inverted_year_range_is_clamped() {
        let (_dir, mut state) = loaded();
        state.set_year_range(2014, 2012);
        assert_eq!(state.criteria.year_range, (2014, 2014));
    }

    #[test]
    fn reload_of_unchanged_file_keeps_selection() {
        let (_dir, mut state) = loaded();
        state.toggle(FilterColumn::Company, "CompanyB");
        state.refresh();
        state.reload();
        assert!(!state.criteria.companies.contains("CompanyB"));
    }

    #[test]
    fn failed_open_reports_without_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.open(&dir.path().join("combined_data.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert!(state.options(FilterColumn::Country).is_empty());
    }
}
