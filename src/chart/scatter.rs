use serde::Serialize;

use crate::color::{DEFAULT_COLOR, to_hex};
use crate::scale::LinearScale;
use crate::state::AppState;
use crate::stats::extent;

use super::Frame;

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Index of the source row in the dataset.
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub category: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub frame: Frame,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub point_radius: f64,
    pub points: Vec<ScatterPoint>,
    /// (category, colour) in category order.
    pub legend: Vec<(String, String)>,
}

/// Lay out the scatter plot from the current state.
///
/// Both axes span the data extent widened by `domain_padding` on each side;
/// the y range is inverted so larger values sit higher. Returns `None` when
/// no dataset is set or no row has a finite x and y.
pub fn layout(state: &AppState) -> Option<ScatterChart> {
    let dataset = state.dataset.as_ref()?;
    let config = &state.config;
    let x_idx = dataset.column_index(&config.columns.x)?;
    let y_idx = dataset.column_index(&config.columns.y)?;
    let cat_idx = dataset.column_index(&config.columns.category)?;

    let coords: Vec<(usize, f64, f64)> = state
        .visible_indices
        .iter()
        .filter_map(|&i| {
            let row = dataset.rows.get(i)?;
            Some((i, row.get(x_idx).as_finite()?, row.get(y_idx).as_finite()?))
        })
        .collect();

    let Some((x_min, x_max)) = extent(coords.iter().map(|&(_, x, _)| x)) else {
        log::warn!("scatter plot skipped: no plottable rows");
        return None;
    };
    let (y_min, y_max) = extent(coords.iter().map(|&(_, _, y)| y))?;

    let pad = config.domain_padding;
    let frame = Frame::from_config(config);
    let x_scale = LinearScale::new([x_min - pad, x_max + pad], [0.0, frame.inner_width]);
    let y_scale = LinearScale::new([y_min - pad, y_max + pad], [frame.inner_height, 0.0]);

    let points = coords
        .into_iter()
        .map(|(row, x, y)| {
            let category = dataset.rows[row].get(cat_idx).to_string();
            let color = state
                .color_map
                .as_ref()
                .map(|cm| cm.color_for(&category))
                .unwrap_or(DEFAULT_COLOR);
            ScatterPoint {
                row,
                x: x_scale.map(x),
                y: y_scale.map(y),
                category,
                color: to_hex(color),
            }
        })
        .collect();

    Some(ScatterChart {
        frame,
        x_label: config.x_label.clone(),
        y_label: config.y_label.clone(),
        x_scale,
        y_scale,
        point_radius: config.point_radius,
        points,
        legend: state
            .color_map
            .as_ref()
            .map(|cm| cm.legend_entries())
            .unwrap_or_default(),
    })
}
