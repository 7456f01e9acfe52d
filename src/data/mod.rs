//! Data layer: core types, loading, coercion, grouping and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Dataset (CSV cells as text)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  coerce  │  text → f64, NaN for anything unparseable
//!   └──────────┘
//!        │
//!        ├──────────────────┐
//!        ▼                  ▼
//!   ┌───────────┐     ┌──────────┐
//!   │ partition │     │  filter  │  rows with finite x/y → indices
//!   └───────────┘     └──────────┘
//!   category → rows, first-seen order
//! ```

pub mod coerce;
pub mod filter;
pub mod loader;
pub mod model;
pub mod partition;
