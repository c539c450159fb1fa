use std::collections::{BTreeMap, BTreeSet};

use super::model::{AttrValue, Catalog, MODEL_COLUMN};

// ---------------------------------------------------------------------------
// Filter predicate: which option values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of selected values.
/// An empty set means "no constraint from this column" (standard faceted
/// filtering: OR within a column, AND across columns).
pub type FilterState = BTreeMap<String, BTreeSet<AttrValue>>;

/// Initialise a [`FilterState`] with every attribute column unconstrained.
pub fn init_filter_state(catalog: &Catalog) -> FilterState {
    catalog
        .attribute_columns
        .iter()
        .map(|col| (col.clone(), BTreeSet::new()))
        .collect()
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// The rows and columns to display after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    /// "Model" followed by every constrained attribute column, in the
    /// catalog's original column order.
    pub active_columns: Vec<String>,
    /// Indices into `catalog.rows` of the products passing all filters.
    pub row_indices: Vec<usize>,
}

/// Outcome of a filter recomputation. `NoMatch` is distinct from an
/// unfiltered (or genuinely empty) catalog so the UI can show a dedicated
/// message instead of an empty table shell.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterResult {
    Rows(FilteredView),
    NoMatch,
}

impl Default for FilterResult {
    fn default() -> Self {
        FilterResult::Rows(FilteredView::default())
    }
}

/// Apply the current selections to the catalog.
///
/// A row passes when, for every column with a non-empty selection set, its
/// value in that column is one of the selected values. Missing cells never
/// match a constrained column since missing values are not selectable.
pub fn filter_rows(catalog: &Catalog, filters: &FilterState) -> FilterResult {
    let constrained: Vec<(&String, &BTreeSet<AttrValue>)> = filters
        .iter()
        .filter(|(_, selected)| !selected.is_empty())
        .collect();

    let mut active_columns = vec![MODEL_COLUMN.to_string()];
    active_columns.extend(
        catalog
            .attribute_columns
            .iter()
            .filter(|col| filters.get(*col).is_some_and(|s| !s.is_empty()))
            .cloned(),
    );

    let row_indices: Vec<usize> = catalog
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            constrained
                .iter()
                .all(|(col, selected)| selected.contains(row.get(col)))
        })
        .map(|(i, _)| i)
        .collect();

    if row_indices.is_empty() && !constrained.is_empty() {
        return FilterResult::NoMatch;
    }

    FilterResult::Rows(FilteredView {
        active_columns,
        row_indices,
    })
}
