//! Chart data for the Iris flower measurements.
//!
//! The pipeline loads a table, coerces the numeric columns, groups rows by
//! species, summarises each group for a box plot and maps everything to
//! pixel coordinates for a scatter plot and a box plot. Drawing is left to
//! whoever consumes the [`chart::ChartReport`].

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod scale;
pub mod state;
pub mod stats;
