use std::path::PathBuf;

use crate::config::AppConfig;
use crate::data::aggregate::{build_dashboard, DashboardOutcome};
use crate::data::filter::{filter_table, FilterOptions, Selection};
use crate::data::model::LiftTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The charts are a pure function of `(dataset, selection)`; `outcome` caches
/// that result and is rebuilt whenever either changes.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded results table (None until a file is loaded).
    pub dataset: Option<LiftTable>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Selector values derived from the dataset.
    pub options: FilterOptions,

    /// Current filter. None when the dataset has no rows to choose from.
    pub selection: Option<Selection>,

    /// Aggregates for the current selection.
    pub outcome: Option<DashboardOutcome>,

    /// Rows matching the current selection.
    pub matching_rows: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dataset: None,
            source: None,
            options: FilterOptions::default(),
            selection: None,
            outcome: None,
            matching_rows: 0,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset the selectors and recompute.
    pub fn set_dataset(&mut self, source: PathBuf, dataset: LiftTable) {
        self.options = FilterOptions::from_table(&dataset);
        self.selection = Selection::initial(&self.options);
        self.dataset = Some(dataset);
        self.source = Some(source);
        self.status_message = None;
        self.recompute();
    }

    /// Replace the current selection and recompute the charts.
    pub fn apply_selection(&mut self, selection: Selection) {
        if self.selection.as_ref() == Some(&selection) {
            return;
        }
        self.selection = Some(selection);
        self.recompute();
    }

    fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.outcome = None;
            self.matching_rows = 0;
            return;
        };
        let Some(selection) = &self.selection else {
            self.outcome = Some(DashboardOutcome::NoData);
            self.matching_rows = 0;
            return;
        };

        let view = filter_table(dataset, selection);
        log::debug!(
            "Selection {} / {} / {} matched {} of {} rows",
            selection.year,
            selection.federation,
            selection.weight_class,
            view.len(),
            dataset.len()
        );
        self.matching_rows = view.len();
        self.outcome = Some(build_dashboard(&view, self.config.top_n));
    }
}
