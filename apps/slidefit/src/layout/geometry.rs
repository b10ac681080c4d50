use serde::{Deserialize, Serialize};

use crate::errors::{LayoutError, Result};

/// An axis-aligned rectangle in canvas coordinates. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Container {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Shrinks the rectangle by `margin` on every side.
    pub fn inset(&self, margin: f32) -> Container {
        Container {
            x: self.x + margin,
            y: self.y + margin,
            width: self.width - 2.0 * margin,
            height: self.height - 2.0 * margin,
        }
    }

    /// Same size, new top-left corner.
    pub fn translate_to(&self, x: f32, y: f32) -> Container {
        Container { x, y, ..*self }
    }

    /// Strict intersection: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Container) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Rejects rectangles text cannot be measured into.
    pub fn ensure_measurable(&self) -> Result<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(LayoutError::DegenerateInput(format!(
                "container has non-finite geometry: {self:?}"
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::DegenerateInput(format!(
                "container must have positive size, got {} x {}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
