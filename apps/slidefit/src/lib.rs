//! Text fitting and slide layout geometry.
//!
//! - `text`: font metrics, greedy wrapping, font-size search and truncation
//! - `layout`: containers, canvas presets, grids, bounds checks and element relationships
//! - `engine`: the fit orchestrator tying both together
//!
//! All measurements are in inches; font sizes are in points.

pub mod config;
pub mod engine;
pub mod errors;
pub mod layout;
pub mod telemetry;
pub mod text;

pub use config::{Config, FitTuning};
pub use engine::{
    EngineConfig, FitDiagnostics, FitEngine, FitOptions, FittedBullets, FittedText,
    BULLET_PROFILE,
};
pub use errors::{LayoutError, Result};
pub use layout::{
    BoundsReport, BoundsViolation, CanvasLayout, CanvasRegistry, Container, GridCell,
    GridWeights, RelationshipReport,
};
pub use telemetry::init_tracing;
pub use text::{
    ContentTypeProfile, FitResult, FontSizeMetrics, MetricsProvider, MetricsTable, Priority,
    ProfileRegistry, TextDimensions,
};
