use serde::Serialize;

use crate::scale::{BandScale, LinearScale};
use crate::state::AppState;
use crate::stats::{Summary, extent};

use super::Frame;

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// One category's box, whiskers and median in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGlyph {
    pub category: String,
    /// Left edge of the band.
    pub x: f64,
    pub width: f64,
    /// Horizontal centre, where the whisker line runs.
    pub center: f64,
    /// Pixel y of Q3.
    pub box_top: f64,
    /// Pixel y of Q1.
    pub box_bottom: f64,
    pub median_y: f64,
    pub whisker_top: f64,
    pub whisker_bottom: f64,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotChart {
    pub frame: Frame,
    pub y_label: String,
    pub y_scale: LinearScale,
    /// Band order along the x axis.
    pub categories: Vec<String>,
    pub bandwidth: f64,
    pub boxes: Vec<BoxGlyph>,
    /// Categories that had no numeric observations and so no box.
    pub missing: Vec<String>,
}

/// Lay out the box plot from the current state.
///
/// The y axis runs from 0 to the largest observation of the value column.
/// Whiskers are drawn at the summary fences even where they pass the data
/// or the axis. Returns `None` when no dataset is set or the value column
/// has no numeric observation at all.
pub fn layout(state: &AppState) -> Option<BoxPlotChart> {
    let dataset = state.dataset.as_ref()?;
    let config = &state.config;

    let values = dataset.numeric_column(&config.columns.value).ok()?;
    let Some((_, max)) = extent(values) else {
        log::warn!("box plot skipped: no numeric '{}' values", config.columns.value);
        return None;
    };

    let frame = Frame::from_config(config);
    let y_scale = LinearScale::new([0.0, max], [frame.inner_height, 0.0]);
    let band = BandScale::new(state.categories.clone(), [0.0, frame.inner_width])
        .padding(config.band_padding);
    let bandwidth = band.bandwidth();

    let mut boxes = Vec::new();
    let mut missing = Vec::new();
    for (category, summary) in &state.summaries {
        let (Some(summary), Some(x)) = (summary, band.map(category)) else {
            missing.push(category.clone());
            continue;
        };
        boxes.push(BoxGlyph {
            category: category.clone(),
            x,
            width: bandwidth,
            center: x + bandwidth / 2.0,
            box_top: y_scale.map(summary.q3),
            box_bottom: y_scale.map(summary.q1),
            median_y: y_scale.map(summary.median),
            whisker_top: y_scale.map(summary.upper_whisker),
            whisker_bottom: y_scale.map(summary.lower_whisker),
            summary: *summary,
        });
    }

    Some(BoxPlotChart {
        frame,
        y_label: config.value_label.clone(),
        y_scale,
        categories: state.categories.clone(),
        bandwidth,
        boxes,
        missing,
    })
}
