//! Chart layouts: pipeline results mapped to pixel coordinates.
//!
//! Each layout reads an [`AppState`](crate::state::AppState) and produces a
//! serialisable description that a renderer can draw without further maths.
//! Coordinates are relative to the inner chart area, i.e. already inside the
//! margins.

pub mod box_plot;
pub mod scatter;

use serde::Serialize;

use crate::config::{ChartConfig, Margin};

/// Outer size and margins shared by both charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl Frame {
    pub fn from_config(config: &ChartConfig) -> Self {
        Frame {
            width: config.width,
            height: config.height,
            margin: config.margin,
            inner_width: config.inner_width(),
            inner_height: config.inner_height(),
        }
    }
}

/// Both charts, as written to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub scatter: Option<scatter::ScatterChart>,
    pub box_plot: Option<box_plot::BoxPlotChart>,
}
