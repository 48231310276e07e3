/// Data layer: record model, fetching, the dataset store, filtering and sorting.
///
/// Architecture:
/// ```text
///   statements endpoint (JSON)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  GET + project → Vec<FinancialRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore  │  original (as fetched) + working (displayed)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │   │   sort    │  working → new working
///   └──────────┘   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod store;
