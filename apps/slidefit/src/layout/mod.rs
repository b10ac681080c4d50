// Layout geometry: canvases, grids, bounds validation and pairwise relationships.
// Independent of text fitting; the fit orchestrator combines the two.

pub mod bounds;
pub mod canvas;
pub mod geometry;
pub mod grid;
pub mod relationships;

// Re-export the public API consumed by the engine and callers.
pub use bounds::{validate_bounds, BoundsReport, BoundsViolation};
pub use canvas::{CanvasLayout, CanvasRegistry, DEFAULT_CANVAS, DEFAULT_SAFE_MARGIN};
pub use geometry::Container;
pub use grid::{create_grid, GridCell, GridWeights};
pub use relationships::{
    calculate_relationships, Alignment, AlignmentAxis, Overlap, RelationshipReport, Spacing,
    ALIGNMENT_TOLERANCE,
};
