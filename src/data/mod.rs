//! Data layer: core types, loading, cleaning and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (raw cells)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  normalize quantity, drop unparseable rows → CleanDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  quantity threshold → subset for the regression chart
//!   └──────────┘
//! ```

pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
