/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Catalog (first column renamed "Model")
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Catalog   │  Vec<CatalogRow>, per-column option sets
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply per-column selections → FilteredView / NoMatch
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
