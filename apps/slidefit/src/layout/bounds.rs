//! Canvas bounds validation with a translate-only correction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::canvas::CanvasLayout;
use crate::layout::geometry::Container;

/// One violated canvas edge and how far the element passes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edge", rename_all = "snake_case")]
pub enum BoundsViolation {
    Left { overflow: f32 },
    Top { overflow: f32 },
    Right { overflow: f32 },
    Bottom { overflow: f32 },
}

impl BoundsViolation {
    pub fn overflow(&self) -> f32 {
        match self {
            BoundsViolation::Left { overflow }
            | BoundsViolation::Top { overflow }
            | BoundsViolation::Right { overflow }
            | BoundsViolation::Bottom { overflow } => *overflow,
        }
    }
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = match self {
            BoundsViolation::Left { .. } => "left",
            BoundsViolation::Top { .. } => "top",
            BoundsViolation::Right { .. } => "right",
            BoundsViolation::Bottom { .. } => "bottom",
        };
        write!(
            f,
            "Element extends {:.2} inches beyond {edge} edge",
            self.overflow()
        )
    }
}

/// Result of checking one element against a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsReport {
    pub valid: bool,
    pub errors: Vec<BoundsViolation>,
    /// Clamped position for invalid elements; width and height are never changed.
    pub suggestion: Option<Container>,
}

impl BoundsReport {
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Checks all four edges of `element` against `canvas`.
///
/// Invalid elements get a suggestion with `x`/`y` clamped into
/// `[0, canvas_dim - element_size]`. An element larger than the canvas is
/// pinned to the origin and stays invalid, since corrections only translate.
pub fn validate_bounds(element: &Container, canvas: &CanvasLayout) -> BoundsReport {
    let mut errors = Vec::new();

    if element.x < 0.0 {
        errors.push(BoundsViolation::Left {
            overflow: -element.x,
        });
    }
    if element.y < 0.0 {
        errors.push(BoundsViolation::Top {
            overflow: -element.y,
        });
    }
    if element.right() > canvas.width {
        errors.push(BoundsViolation::Right {
            overflow: element.right() - canvas.width,
        });
    }
    if element.bottom() > canvas.height {
        errors.push(BoundsViolation::Bottom {
            overflow: element.bottom() - canvas.height,
        });
    }

    let valid = errors.is_empty();
    let suggestion = (!valid).then(|| {
        let x = element.x.min(canvas.width - element.width).max(0.0);
        let y = element.y.min(canvas.height - element.height).max(0.0);
        element.translate_to(x, y)
    });

    BoundsReport {
        valid,
        errors,
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasLayout {
        CanvasLayout::widescreen()
    }

    #[test]
    fn test_inside_element_is_valid() {
        let report = validate_bounds(&Container::new(0.5, 0.5, 9.0, 4.625), &canvas());
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.suggestion.is_none());
    }

    #[test]
    fn test_right_edge_overflow() {
        let report = validate_bounds(&Container::new(9.0, 0.0, 2.0, 1.0), &canvas());
        assert!(!report.valid);
        assert_eq!(report.errors, vec![BoundsViolation::Right { overflow: 1.0 }]);
        assert_eq!(
            report.messages(),
            vec!["Element extends 1.00 inches beyond right edge"]
        );
        let suggestion = report.suggestion.expect("invalid element gets a suggestion");
        assert_eq!(suggestion, Container::new(8.0, 0.0, 2.0, 1.0));
    }

    #[test]
    fn test_every_edge_reported() {
        let report = validate_bounds(&Container::new(-1.0, -0.5, 12.0, 7.0), &canvas());
        assert_eq!(report.errors.len(), 4);
        let messages = report.messages().join("; ");
        assert!(messages.contains("left"));
        assert!(messages.contains("top"));
        assert!(messages.contains("right"));
        assert!(messages.contains("bottom"));
    }

    #[test]
    fn test_suggestion_round_trip_is_valid() {
        let elements = [
            Container::new(9.0, 0.0, 2.0, 1.0),
            Container::new(-2.0, 3.0, 4.0, 1.0),
            Container::new(3.0, -0.25, 1.0, 1.0),
            Container::new(7.5, 5.0, 3.0, 2.0),
            Container::new(-0.1, 5.6, 10.0, 0.5),
        ];
        for element in elements {
            let report = validate_bounds(&element, &canvas());
            assert!(!report.valid, "{element:?} should start out of bounds");
            let corrected = report.suggestion.unwrap();
            assert_eq!(corrected.width, element.width, "corrections never resize");
            assert_eq!(corrected.height, element.height);
            let recheck = validate_bounds(&corrected, &canvas());
            assert!(recheck.valid, "{corrected:?} still invalid: {:?}", recheck.errors);
        }
    }

    #[test]
    fn test_oversized_element_pinned_to_origin() {
        let report = validate_bounds(&Container::new(1.0, 1.0, 11.0, 1.0), &canvas());
        let suggestion = report.suggestion.unwrap();
        assert_eq!((suggestion.x, suggestion.y), (0.0, 1.0));
        assert!(!validate_bounds(&suggestion, &canvas()).valid);
    }

    #[test]
    fn test_violation_serializes_with_edge_tag() {
        let json = serde_json::to_value(BoundsViolation::Bottom { overflow: 0.5 }).unwrap();
        assert_eq!(json["edge"], "bottom");
        assert_eq!(json["overflow"], 0.5);
    }
}
