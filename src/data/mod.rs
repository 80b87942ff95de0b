/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, normalize "Opened" → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<Dataset> snapshot, reloaded on mtime change
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → filtered indices → valid indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics, matrix, shares, histogram, map, table
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
