/// Data layer: records, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///   Superstore.csv (latin-1)
///        │
///        ▼
///   ┌──────────────┐
///   │ cache/loader  │  parse once → Arc<Dataset> (+ Profit Margin)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Region ∧ Category ∧ Segment membership → FilteredView
///   └──────────┘
///        │
///        ├──────────────► export    (UTF-8 CSV of the view)
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs + grouped totals
///   └───────────┘
///        │
///        ▼
///   report::render → ViewModel
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
