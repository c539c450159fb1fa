use std::collections::BTreeSet;

use crate::data::filter::{filter_rows, init_filter_state, FilterResult, FilterState};
use crate::data::model::{AttrValue, Catalog};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded catalog (None until a file is loaded).
    pub catalog: Option<Catalog>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Result of the last filter recomputation (cached).
    pub view: FilterResult,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: None,
            filters: FilterState::default(),
            view: FilterResult::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded catalog and start from an unfiltered view.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.filters = init_filter_state(&catalog);
        self.catalog = Some(catalog);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the cached view after a filter change.
    pub fn refilter(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.view = filter_rows(catalog, &self.filters);
        }
    }

    /// Current selection for one column.
    pub fn selection(&self, column: &str) -> Option<&BTreeSet<AttrValue>> {
        self.filters.get(column)
    }

    /// Replace one column's selection wholesale.
    pub fn set_selection(&mut self, column: &str, values: BTreeSet<AttrValue>) {
        self.filters.insert(column.to_string(), values);
        self.refilter();
    }

    /// Toggle a single value in a column's selection.
    pub fn toggle_filter_value(&mut self, column: &str, value: &AttrValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Reset every column's selection, then recompute once.
    pub fn clear_filters(&mut self) {
        for selected in self.filters.values_mut() {
            selected.clear();
        }
        self.refilter();
    }

    /// Number of rows passing the current filters.
    pub fn matching_rows(&self) -> usize {
        match &self.view {
            FilterResult::Rows(view) => view.row_indices.len(),
            FilterResult::NoMatch => 0,
        }
    }
}
