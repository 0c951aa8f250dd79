/// Data layer: core types, fetching, and filtering.
///
/// Architecture:
/// ```text
///   Sheets API (HTTP)
///        │
///        ▼
///   ┌──────────┐
///   │  sheets   │  authorized client → value grid
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + coerce hours, TTL cache → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  RawTable │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  project columns, cluster filter, mean
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sheets;
