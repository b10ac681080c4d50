//! Even and weighted grid subdivision.
//!
//! Weights scale a row's or column's share of the base cell size. They are not
//! normalized: weights whose total exceeds the row/column count push cells past
//! the parent region (a warning is logged). Choosing weights that keep the
//! partition inside the parent is the caller's responsibility.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tolerance for the "weighted cells overrun the parent" check.
const OVERRUN_EPSILON: f32 = 1e-4;

/// One cell of a subdivided region, in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub row: usize,
    pub col: usize,
    pub center_x: f32,
    pub center_y: f32,
}

/// Per-row and per-column size multipliers. Missing entries count as `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridWeights {
    pub rows: Vec<f32>,
    pub cols: Vec<f32>,
}

impl GridWeights {
    pub fn cols(cols: Vec<f32>) -> Self {
        GridWeights { rows: vec![], cols }
    }

    pub fn rows(rows: Vec<f32>) -> Self {
        GridWeights { rows, cols: vec![] }
    }
}

fn weighted_extents(base: f32, count: usize, weights: Option<&[f32]>) -> Vec<f32> {
    (0..count)
        .map(|i| {
            let weight = weights.and_then(|w| w.get(i)).copied().unwrap_or(1.0);
            base * weight
        })
        .collect()
}

/// Subdivides a `total_width` x `total_height` region at `(start_x, start_y)`
/// into `rows` x `cols` cells separated by `spacing`, emitted row-major.
///
/// Without weights the cells plus spacing cover the region exactly. Zero rows
/// or columns produce no cells.
#[allow(clippy::too_many_arguments)]
pub fn create_grid(
    total_width: f32,
    total_height: f32,
    rows: usize,
    cols: usize,
    spacing: f32,
    weights: Option<&GridWeights>,
    start_x: f32,
    start_y: f32,
) -> Vec<GridCell> {
    if rows == 0 || cols == 0 {
        return vec![];
    }

    let base_width = (total_width - spacing * (cols - 1) as f32) / cols as f32;
    let base_height = (total_height - spacing * (rows - 1) as f32) / rows as f32;

    let col_widths = weighted_extents(base_width, cols, weights.map(|w| w.cols.as_slice()));
    let row_heights = weighted_extents(base_height, rows, weights.map(|w| w.rows.as_slice()));

    let used_width: f32 = col_widths.iter().sum::<f32>() + spacing * (cols - 1) as f32;
    let used_height: f32 = row_heights.iter().sum::<f32>() + spacing * (rows - 1) as f32;
    if used_width > total_width + OVERRUN_EPSILON || used_height > total_height + OVERRUN_EPSILON {
        warn!(
            used_width,
            total_width,
            used_height,
            total_height,
            "Grid weights overrun the parent region; cells will extend past it"
        );
    }

    let mut cells = Vec::with_capacity(rows * cols);
    let mut y = start_y;
    for (row, &height) in row_heights.iter().enumerate() {
        let mut x = start_x;
        for (col, &width) in col_widths.iter().enumerate() {
            cells.push(GridCell {
                x,
                y,
                width,
                height,
                row,
                col,
                center_x: x + width / 2.0,
                center_y: y + height / 2.0,
            });
            x += width + spacing;
        }
        y += height + spacing;
    }
    cells
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
