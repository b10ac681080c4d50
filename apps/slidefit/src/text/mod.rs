// Text fitting: static metrics, content type profiles, greedy wrap, size search, truncation.
// Everything here is pure and synchronous; measurements are approximations from the metrics table.

pub mod font_metrics;
pub mod profiles;
pub mod search;
pub mod truncate;
pub mod wrap;

// Re-export the public API consumed by the engine and callers.
pub use font_metrics::{FontSizeMetrics, MetricsProvider, MetricsTable};
pub use profiles::{ContentTypeProfile, Priority, ProfileRegistry};
pub use search::{candidate_sizes, fill_ratio, find_optimal_font_size, search_font_size, FitResult};
pub use truncate::{retry_budget, truncate_text_intelligently, ELLIPSIS};
pub use wrap::{calculate_text_dimensions, measure_bullets, wrap_text, TextDimensions, BULLET_MARKER};
