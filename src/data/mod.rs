/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LiftTable (+ ColumnPresence)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (year, federation, weight class) → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  sex distribution + top-10 per lift → Dashboard
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
