//! Named canvas presets and their safe areas.
//!
//! Dimensions are in inches, matching the usual presentation page sizes.
//! The safe area is where content is guaranteed not to be clipped by viewer margins.
//!
//! # Available presets
//! - `16:9`: 10 x 5.625, the default
//! - `16:9-large`: 13.333 x 7.5
//! - `4:3`: 10 x 7.5

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{LayoutError, Result};
use crate::layout::geometry::Container;
use crate::layout::grid::{create_grid, GridCell, GridWeights};

pub const DEFAULT_CANVAS: &str = "16:9";

/// Margin between the canvas edge and the safe area for the built-in presets.
pub const DEFAULT_SAFE_MARGIN: f32 = 0.5;

/// A bounded drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasLayout {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub safe_area: Container,
}

impl CanvasLayout {
    /// A canvas whose safe area is inset by `margin` on every side.
    pub fn with_margin(name: impl Into<String>, width: f32, height: f32, margin: f32) -> Self {
        CanvasLayout {
            name: name.into(),
            width,
            height,
            safe_area: Container::new(0.0, 0.0, width, height).inset(margin),
        }
    }

    pub fn widescreen() -> Self {
        Self::with_margin("16:9", 10.0, 5.625, DEFAULT_SAFE_MARGIN)
    }

    pub fn widescreen_large() -> Self {
        Self::with_margin("16:9-large", 13.333, 7.5, DEFAULT_SAFE_MARGIN)
    }

    pub fn standard() -> Self {
        Self::with_margin("4:3", 10.0, 7.5, DEFAULT_SAFE_MARGIN)
    }

    /// The full canvas as a rectangle at the origin.
    pub fn bounds(&self) -> Container {
        Container::new(0.0, 0.0, self.width, self.height)
    }

    /// Subdivides the safe area into a grid.
    pub fn content_grid(
        &self,
        rows: usize,
        cols: usize,
        spacing: f32,
        weights: Option<&GridWeights>,
    ) -> Vec<GridCell> {
        create_grid(
            self.safe_area.width,
            self.safe_area.height,
            rows,
            cols,
            spacing,
            weights,
            self.safe_area.x,
            self.safe_area.y,
        )
    }
}

/// Canvas lookup by name. Read-only once handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasRegistry {
    canvases: BTreeMap<String, CanvasLayout>,
}

impl CanvasRegistry {
    pub fn standard() -> Self {
        Self::from_canvases([
            CanvasLayout::widescreen(),
            CanvasLayout::widescreen_large(),
            CanvasLayout::standard(),
        ])
    }

    pub fn from_canvases(canvases: impl IntoIterator<Item = CanvasLayout>) -> Self {
        CanvasRegistry {
            canvases: canvases
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&CanvasLayout> {
        self.canvases
            .get(name.trim())
            .ok_or_else(|| LayoutError::NotFound(format!("canvas '{name}'")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.canvases.keys().map(String::as_str)
    }
}

impl Default for CanvasRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
