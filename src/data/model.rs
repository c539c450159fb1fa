use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Fixed display name of the identifier column. The first column of the
/// input file becomes this column regardless of its original header.
pub const MODEL_COLUMN: &str = "Model";

// ---------------------------------------------------------------------------
// AttrValue – a single cell in an attribute column
// ---------------------------------------------------------------------------

/// A dynamically-typed attribute value, covering the cell types that show up
/// in spreadsheet-style catalogs. Using `BTreeMap` / `BTreeSet` downstream so
/// `AttrValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Missing,
}

// -- Manual Eq/Ord so we can put AttrValue in BTreeSet --

impl Eq for AttrValue {}

impl PartialOrd for AttrValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AttrValue {
    /// Total order: missing < bool < numeric < text. Integers and floats
    /// compare numerically against each other so a column mixing both still
    /// sorts in value order; ties fall back to the variant so the order stays
    /// consistent with `Eq`. Columns mixing numbers and text get a stable
    /// class-first order rather than an error.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use AttrValue::*;
        fn class(v: &AttrValue) -> u8 {
            match v {
                Missing => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                Text(_) => 3,
            }
        }
        fn variant(v: &AttrValue) -> u8 {
            match v {
                Integer(_) => 0,
                Float(_) => 1,
                _ => 2,
            }
        }
        let ca = class(self);
        let cb = class(other);
        if ca != cb {
            return ca.cmp(&cb);
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => {
                let fa = self.as_f64().unwrap_or(f64::NAN);
                let fb = other.as_f64().unwrap_or(f64::NAN);
                fa.total_cmp(&fb)
                    .then_with(|| variant(self).cmp(&variant(other)))
            }
        }
    }
}

impl std::hash::Hash for AttrValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            AttrValue::Text(s) => s.hash(state),
            AttrValue::Integer(i) => i.hash(state),
            AttrValue::Float(f) => f.to_bits().hash(state),
            AttrValue::Bool(b) => b.hash(state),
            AttrValue::Missing => {}
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{s}"),
            AttrValue::Integer(i) => write!(f, "{i}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Missing => write!(f, "n/a"),
        }
    }
}

impl AttrValue {
    /// Interpret the value as an `f64` for numeric comparison.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            AttrValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, AttrValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// CatalogRow – one product of the catalog
// ---------------------------------------------------------------------------

static MISSING: AttrValue = AttrValue::Missing;

/// A single catalog entry (one row of the source table).
#[derive(Debug, Clone)]
pub struct CatalogRow {
    /// Identifier column value, shown but never filtered.
    pub model: String,
    /// Attribute columns: column_name → value.
    pub attributes: BTreeMap<String, AttrValue>,
}

impl CatalogRow {
    /// Value of the given attribute column; absent cells read as missing.
    pub fn get(&self, column: &str) -> &AttrValue {
        self.attributes.get(column).unwrap_or(&MISSING)
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed catalog with pre-computed per-column option sets.
/// Read-only after load.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All products (rows).
    pub rows: Vec<CatalogRow>,
    /// Attribute column names in the file's original order (identifier
    /// column excluded).
    pub attribute_columns: Vec<String>,
    /// For each attribute column the sorted set of distinct non-missing
    /// values, used to populate that column's checklist.
    pub options: BTreeMap<String, BTreeSet<AttrValue>>,
}

impl Catalog {
    /// Build the catalog and derive per-column option sets from the rows.
    pub fn from_rows(attribute_columns: Vec<String>, rows: Vec<CatalogRow>) -> Self {
        let mut options: BTreeMap<String, BTreeSet<AttrValue>> = attribute_columns
            .iter()
            .map(|col| (col.clone(), BTreeSet::new()))
            .collect();

        for row in &rows {
            for (col, val) in &row.attributes {
                if val.is_missing() {
                    continue;
                }
                if let Some(set) = options.get_mut(col) {
                    set.insert(val.clone());
                }
            }
        }

        Catalog {
            rows,
            attribute_columns,
            options,
        }
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(model: &str, attrs: &[(&str, AttrValue)]) -> CatalogRow {
        CatalogRow {
            model: model.to_string(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn options_contain_each_value_exactly_once_sorted() {
        let catalog = Catalog::from_rows(
            vec!["Color".into(), "Price".into()],
            vec![
                row("A", &[("Color", AttrValue::Text("Red".into())), ("Price", AttrValue::Integer(10))]),
                row("B", &[("Color", AttrValue::Text("Blue".into())), ("Price", AttrValue::Integer(20))]),
                row("C", &[("Color", AttrValue::Text("Red".into())), ("Price", AttrValue::Integer(20))]),
            ],
        );

        let colors: Vec<_> = catalog.options["Color"].iter().cloned().collect();
        assert_eq!(
            colors,
            vec![AttrValue::Text("Blue".into()), AttrValue::Text("Red".into())]
        );
        let prices: Vec<_> = catalog.options["Price"].iter().cloned().collect();
        assert_eq!(prices, vec![AttrValue::Integer(10), AttrValue::Integer(20)]);
    }

    #[test]
    fn missing_values_excluded_from_options() {
        let catalog = Catalog::from_rows(
            vec!["Color".into()],
            vec![
                row("A", &[("Color", AttrValue::Missing)]),
                row("B", &[("Color", AttrValue::Text("Red".into()))]),
            ],
        );
        assert_eq!(catalog.options["Color"].len(), 1);
        assert!(!catalog.options["Color"].contains(&AttrValue::Missing));
    }

    #[test]
    fn all_missing_column_yields_empty_options() {
        let catalog = Catalog::from_rows(
            vec!["Color".into()],
            vec![
                row("A", &[("Color", AttrValue::Missing)]),
                row("B", &[("Color", AttrValue::Missing)]),
            ],
        );
        assert!(catalog.options["Color"].is_empty());
    }

    #[test]
    fn empty_catalog_yields_empty_options_per_column() {
        let catalog = Catalog::from_rows(vec!["Color".into(), "Price".into()], vec![]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.options.len(), 2);
        assert!(catalog.options.values().all(|set| set.is_empty()));
    }

    #[test]
    fn integers_and_floats_sort_numerically_together() {
        let mut set = BTreeSet::new();
        set.insert(AttrValue::Float(2.5));
        set.insert(AttrValue::Integer(3));
        set.insert(AttrValue::Integer(2));
        let sorted: Vec<_> = set.into_iter().collect();
        assert_eq!(
            sorted,
            vec![
                AttrValue::Integer(2),
                AttrValue::Float(2.5),
                AttrValue::Integer(3)
            ]
        );
    }

    #[test]
    fn mixed_text_and_number_columns_have_a_stable_total_order() {
        let a = AttrValue::Integer(99);
        let b = AttrValue::Text("10".into());
        assert!(a < b);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn integer_and_equal_float_stay_distinct_in_sets() {
        let mut set = BTreeSet::new();
        set.insert(AttrValue::Integer(2));
        set.insert(AttrValue::Float(2.0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn absent_attribute_reads_as_missing() {
        let r = row("A", &[]);
        assert!(r.get("Color").is_missing());
    }

    #[test]
    fn display_formats() {
        assert_eq!(AttrValue::Text("Red".into()).to_string(), "Red");
        assert_eq!(AttrValue::Integer(20).to_string(), "20");
        assert_eq!(AttrValue::Float(2.5).to_string(), "2.5");
        assert_eq!(AttrValue::Bool(true).to_string(), "true");
        assert_eq!(AttrValue::Missing.to_string(), "n/a");
    }
}
