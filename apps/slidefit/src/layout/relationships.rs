//! Pairwise geometric relationships between placed elements.
//!
//! Full O(n^2) scan over unordered pairs; slides rarely carry more than a
//! couple of dozen elements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::geometry::Container;

/// Maximum coordinate difference for two elements to count as aligned.
pub const ALIGNMENT_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentAxis {
    /// Same `y`: the elements sit on one row.
    Horizontal,
    /// Same `x`: the elements sit in one column.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub first: usize,
    pub second: usize,
    pub axis: AlignmentAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub first: usize,
    pub second: usize,
    /// Smallest positive edge-to-edge gap.
    pub gap: f32,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.axis {
            AlignmentAxis::Horizontal => "horizontally",
            AlignmentAxis::Vertical => "vertically",
        };
        write!(
            f,
            "Elements {} and {} are {axis} aligned",
            self.first, self.second
        )
    }
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Elements {} and {} overlap", self.first, self.second)
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Elements {} and {} are {:.2} inches apart",
            self.first, self.second, self.gap
        )
    }
}

/// Alignments, overlaps and spacings among a set of elements, by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipReport {
    pub alignments: Vec<Alignment>,
    pub overlaps: Vec<Overlap>,
    pub spacings: Vec<Spacing>,
}

impl RelationshipReport {
    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty() && self.overlaps.is_empty() && self.spacings.is_empty()
    }

    /// Every relationship as a sentence, alignments first.
    pub fn describe(&self) -> Vec<String> {
        self.alignments
            .iter()
            .map(ToString::to_string)
            .chain(self.overlaps.iter().map(ToString::to_string))
            .chain(self.spacings.iter().map(ToString::to_string))
            .collect()
    }
}

/// Smallest positive edge-to-edge gap, `None` for touching or overlapping pairs.
fn edge_gap(a: &Container, b: &Container) -> Option<f32> {
    [
        b.x - a.right(),
        a.x - b.right(),
        b.y - a.bottom(),
        a.y - b.bottom(),
    ]
    .into_iter()
    .filter(|gap| *gap > 0.0)
    .reduce(f32::min)
}

pub fn calculate_relationships(elements: &[Container]) -> RelationshipReport {
    let mut report = RelationshipReport::default();

    for (i, a) in elements.iter().enumerate() {
        for (j, b) in elements.iter().enumerate().skip(i + 1) {
            if (a.y - b.y).abs() < ALIGNMENT_TOLERANCE {
                report.alignments.push(Alignment {
                    first: i,
                    second: j,
                    axis: AlignmentAxis::Horizontal,
                });
            }
            if (a.x - b.x).abs() < ALIGNMENT_TOLERANCE {
                report.alignments.push(Alignment {
                    first: i,
                    second: j,
                    axis: AlignmentAxis::Vertical,
                });
            }

            if a.intersects(b) {
                report.overlaps.push(Overlap {
                    first: i,
                    second: j,
                });
            }

            if let Some(gap) = edge_gap(a, b) {
                report.spacings.push(Spacing {
                    first: i,
                    second: j,
                    gap,
                });
            }
        }
    }

    report
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
