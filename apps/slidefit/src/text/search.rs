//! Discrete font-size search.
//!
//! # Algorithm
//! 1. Start at `min(floor(max_font_size * 0.8), floor(container.height * 72))`.
//! 2. Step down by 4 toward the profile minimum, snapping every candidate down
//!    to a size the metrics table supports. The minimum is always tried last.
//! 3. A candidate fits when its wrapped block is at most 90% of the container height.
//! 4. Fitting candidates are scored by fill ratio; the best (first on ties) wins.
//! 5. Stop as soon as a candidate's fill ratio reaches 0.7.
//!
//! The 0.8 ceiling and the 10% height margin absorb the error of the static
//! metrics table. All constants live in [`FitTuning`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FitTuning;
use crate::errors::{LayoutError, Result};
use crate::layout::Container;
use crate::text::font_metrics::{FontSizeMetrics, MetricsProvider};
use crate::text::profiles::ContentTypeProfile;
use crate::text::wrap::{calculate_text_dimensions, TextDimensions};

/// Outcome of a font-size search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub font_size: u32,
    /// Block measured at `font_size`. Also set for unfitted results (at the minimum size).
    pub dimensions: Option<TextDimensions>,
    /// Fill ratio of the chosen size; `0.0` when nothing fitted.
    pub fit_score: f32,
    /// False when no tested size kept the block within the height margin.
    pub fitted: bool,
}

/// Combined vertical and horizontal utilization of a wrapped block.
///
/// `total_height / container_height + horizontal_weight * (average_line_length / max_chars_per_line)`
pub fn fill_ratio(
    dims: &TextDimensions,
    container_height: f32,
    max_chars_per_line: usize,
    tuning: &FitTuning,
) -> f32 {
    let vertical = dims.total_height / container_height;
    let horizontal = if max_chars_per_line == 0 {
        0.0
    } else {
        dims.average_line_length / max_chars_per_line as f32
    };
    vertical + tuning.horizontal_weight * horizontal
}

/// Candidate sizes in the order they are tried, largest first.
pub fn candidate_sizes(
    profile: &ContentTypeProfile,
    container_height: f32,
    metrics: &dyn MetricsProvider,
    tuning: &FitTuning,
) -> Result<Vec<u32>> {
    let floor_size = metrics
        .snap_up(profile.min_font_size)
        .filter(|s| profile.admits(*s))
        .ok_or_else(|| {
            LayoutError::Validation(format!(
                "no supported font size between {} and {} for '{}'",
                profile.min_font_size, profile.max_font_size, profile.name
            ))
        })?;

    let ceiling = (profile.max_font_size as f32 * tuning.size_ceiling).floor() as u32;
    // float-to-int casts saturate, so absurdly tall containers just hit the ceiling
    let by_height = (container_height * tuning.points_per_unit).floor() as u32;
    let step = tuning.size_step.max(1);

    let mut sizes: Vec<u32> = Vec::new();
    let mut size = ceiling.min(by_height);
    while size >= profile.min_font_size {
        if let Some(snapped) = metrics.snap_down(size) {
            if snapped >= floor_size && profile.admits(snapped) && !sizes.contains(&snapped) {
                sizes.push(snapped);
            }
        }
        if size < step {
            break;
        }
        size -= step;
    }
    if sizes.last() != Some(&floor_size) {
        sizes.push(floor_size);
    }
    Ok(sizes)
}

/// Searches the profile's size range for the best-filling size that fits `container`.
///
/// Never fails for long text: an unfittable block comes back with
/// `fitted == false` and the caller decides whether to truncate and retry.
pub fn find_optimal_font_size(
    text: &str,
    container: &Container,
    profile: &ContentTypeProfile,
    metrics: &dyn MetricsProvider,
    tuning: &FitTuning,
) -> Result<FitResult> {
    search_font_size(container, profile, metrics, tuning, |size_metrics, width| {
        calculate_text_dimensions(text, size_metrics, width)
    })
}

/// Size search over an arbitrary block measurement, e.g. a bullet list.
///
/// `measure` receives the candidate's metrics and the container width.
pub fn search_font_size<F>(
    container: &Container,
    profile: &ContentTypeProfile,
    metrics: &dyn MetricsProvider,
    tuning: &FitTuning,
    measure: F,
) -> Result<FitResult>
where
    F: Fn(&FontSizeMetrics, f32) -> TextDimensions,
{
    container.ensure_measurable()?;

    let sizes = candidate_sizes(profile, container.height, metrics, tuning)?;
    let height_limit = container.height * tuning.height_safety;

    let mut best: Option<(u32, TextDimensions, f32)> = None;
    let mut smallest: Option<(u32, TextDimensions)> = None;

    for size in sizes {
        let size_metrics = lookup(metrics, size)?;
        let dims = measure(&size_metrics, container.width);
        let fits = dims.total_height <= height_limit;

        if !fits {
            debug!(
                font_size = size,
                total_height = dims.total_height,
                height_limit,
                "Candidate size overflows container"
            );
            smallest = Some((size, dims));
            continue;
        }

        let max_chars = size_metrics.max_chars_per_line(container.width);
        let fill = fill_ratio(&dims, container.height, max_chars, tuning);
        debug!(font_size = size, fill, lines = dims.line_count(), "Candidate size fits");

        // strict comparison keeps the larger size on ties
        let improves = best.as_ref().map_or(true, |(_, _, score)| fill > *score);
        if improves {
            best = Some((size, dims, fill));
        }
        if fill >= tuning.good_fill {
            break;
        }
    }

    Ok(match (best, smallest) {
        (Some((font_size, dims, fit_score)), _) => FitResult {
            font_size,
            dimensions: Some(dims),
            fit_score,
            fitted: true,
        },
        (None, Some((font_size, dims))) => FitResult {
            font_size,
            dimensions: Some(dims),
            fit_score: 0.0,
            fitted: false,
        },
        // candidate_sizes always yields at least the floor size
        (None, None) => FitResult {
            font_size: profile.min_font_size,
            dimensions: None,
            fit_score: 0.0,
            fitted: false,
        },
    })
}

fn lookup(metrics: &dyn MetricsProvider, size: u32) -> Result<FontSizeMetrics> {
    metrics
        .metrics_for(size)
        .ok_or_else(|| LayoutError::Validation(format!("unsupported font size {size}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::text::font_metrics::MetricsTable;
    use crate::text::profiles::ProfileRegistry;

    fn profile(name: &str) -> ContentTypeProfile {
        ProfileRegistry::standard().get(name).unwrap().clone()
    }

    fn search(text: &str, container: Container, content_type: &str) -> FitResult {
        find_optimal_font_size(
            text,
            &container,
            &profile(content_type),
            &MetricsTable::standard(),
            &FitTuning::default(),
        )
        .expect("measurable container")
    }

    #[test]
    fn test_candidates_step_down_from_ceiling() {
        // title: floor(56 * 0.8) = 44, tall container does not cap it
        let sizes = candidate_sizes(
            &profile("title"),
            3.0,
            &MetricsTable::standard(),
            &FitTuning::default(),
        )
        .unwrap();
        assert_eq!(sizes, vec![44, 40, 36, 32, 28]);
    }

    #[test]
    fn test_candidates_capped_by_container_height() {
        // body: ceiling 22, but 0.25 * 72 = 18
        let sizes = candidate_sizes(
            &profile("body"),
            0.25,
            &MetricsTable::standard(),
            &FitTuning::default(),
        )
        .unwrap();
        assert_eq!(sizes, vec![18, 14, 12]);
    }

    #[test]
    fn test_candidates_snap_odd_start_to_table() {
        // subtitle: ceiling 32, but 0.43 * 72 = 30.96 floors to 30
        let sizes = candidate_sizes(
            &profile("subtitle"),
            0.43,
            &MetricsTable::standard(),
            &FitTuning::default(),
        )
        .unwrap();
        assert_eq!(sizes, vec![30, 26, 22, 18]);
    }

    #[test]
    fn test_short_container_is_unfitted() {
        let result = search("Minimal", Container::new(0.0, 0.0, 8.0, 0.2), "title");
        assert!(!result.fitted);
        assert_eq!(result.font_size, 28);
        assert_eq!(result.fit_score, 0.0);
        assert!(result.dimensions.is_some(), "best-effort dimensions are reported");
    }

    #[test]
    fn test_title_fits_at_largest_size() {
        let result = search(
            "Quarterly Results",
            Container::new(0.5, 0.5, 9.0, 1.0),
            "title",
        );
        assert!(result.fitted);
        assert_eq!(result.font_size, 44);
        assert!(result.fit_score >= 0.7);
    }

    #[test]
    fn test_long_body_steps_down() {
        let text = "Urban farms reclaim rooftops and vacant lots to grow produce close to \
                    where it is eaten, cutting transport emissions and giving neighbourhoods \
                    fresh food, green space and jobs. Hydroponic racks multiply yield per \
                    square metre while rainwater capture keeps irrigation costs low.";
        let container = Container::new(0.5, 1.5, 4.0, 2.0);
        let result = search(text, container, "body");
        assert!(result.fitted);
        assert!(result.font_size < 22, "long text should not fit at the ceiling");
        let dims = result.dimensions.unwrap();
        assert!(dims.total_height <= container.height * 0.9);
    }

    #[test]
    fn test_fitted_size_within_profile_range() {
        let texts = [
            "A",
            "A short caption",
            "Something a little longer that should wrap onto a couple of lines at most sizes",
        ];
        let containers = [
            Container::new(0.0, 0.0, 2.0, 0.5),
            Container::new(0.0, 0.0, 6.0, 1.5),
            Container::new(0.0, 0.0, 9.0, 4.0),
        ];
        for name in ["title", "subtitle", "body", "caption", "bullet"] {
            let p = profile(name);
            for text in texts {
                for container in containers {
                    let result = search(text, container, name);
                    if result.fitted {
                        assert!(
                            p.admits(result.font_size),
                            "{name}: {} outside [{}, {}]",
                            result.font_size,
                            p.min_font_size,
                            p.max_font_size
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_total_height_non_increasing_with_size() {
        let text = "Greedy wrapping produces more, shorter lines as the font gets smaller";
        let table = MetricsTable::standard();
        let mut previous = f32::INFINITY;
        for size in table.sizes().into_iter().rev() {
            let dims = calculate_text_dimensions(text, &table.metrics_for(size).unwrap(), 5.0);
            assert!(
                dims.total_height <= previous + 1e-4,
                "height grew at {size}pt: {} > {previous}",
                dims.total_height
            );
            previous = dims.total_height;
        }
    }

    #[test]
    fn test_zero_height_container_is_degenerate() {
        let err = find_optimal_font_size(
            "text",
            &Container::new(0.0, 0.0, 4.0, 0.0),
            &profile("body"),
            &MetricsTable::standard(),
            &FitTuning::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateInput(_)));
    }

    #[test]
    fn test_profile_outside_table_is_rejected() {
        let huge = ContentTypeProfile::new(
            "banner",
            20,
            90,
            120,
            crate::text::profiles::Priority::High,
        );
        let err = find_optimal_font_size(
            "Hi",
            &Container::new(0.0, 0.0, 10.0, 5.0),
            &huge,
            &MetricsTable::standard(),
            &FitTuning::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Validation(_)));
    }

    #[test]
    fn test_later_candidate_with_better_fill_wins() {
        // 22pt wraps to two lines (fill ~0.53); 18pt holds all 43 characters on one line (~0.59)
        let container = Container::new(0.5, 1.5, 4.25, 3.25);
        let result = search("The quick brown fox jumps over the lazy dog", container, "body");
        assert!(result.fitted);
        assert_eq!(result.font_size, 18, "first fitting size was 22, but 18 fills better");
        assert_eq!(result.dimensions.as_ref().unwrap().line_count(), 1);
        assert!((result.fit_score - 0.592).abs() < 0.01, "score was {}", result.fit_score);
    }

    // Sizes 8, 12 and 16, each 16 characters wide in a 2.0 container.
    fn flat_table() -> MetricsTable {
        MetricsTable::from_entries([8, 12, 16].map(|size| FontSizeMetrics {
            size,
            line_height: 0.125,
            char_width: 0.125,
            descender: 0.0,
        }))
    }

    // Candidates 16, 12, 8: ceiling floor(20 * 0.8) = 16, stepping by 4.
    fn scripted_search(heights: &[(u32, f32)], evaluated: &RefCell<Vec<u32>>) -> FitResult {
        let profile = ContentTypeProfile::new(
            "scripted",
            100,
            8,
            20,
            crate::text::profiles::Priority::Normal,
        );
        search_font_size(
            &Container::new(0.0, 0.0, 2.0, 1.0),
            &profile,
            &flat_table(),
            &FitTuning::default(),
            |size_metrics, _width| {
                evaluated.borrow_mut().push(size_metrics.size);
                let total_height = heights
                    .iter()
                    .find(|(size, _)| *size == size_metrics.size)
                    .map_or(0.0, |(_, h)| *h);
                TextDimensions {
                    lines: vec![],
                    line_height: size_metrics.line_height,
                    total_height,
                    average_line_length: 0.0,
                    overflow: false,
                }
            },
        )
        .unwrap()
    }

    #[test]
    fn test_best_fill_wins_over_first_fit() {
        let evaluated = RefCell::new(vec![]);
        let result = scripted_search(&[(16, 0.25), (12, 0.5), (8, 0.125)], &evaluated);
        assert_eq!(result.font_size, 12);
        assert_eq!(result.fit_score, 0.5);
        assert_eq!(*evaluated.borrow(), vec![16, 12, 8], "no candidate reached 0.7");
    }

    #[test]
    fn test_equal_fill_keeps_larger_size() {
        let evaluated = RefCell::new(vec![]);
        let result = scripted_search(&[(16, 0.5), (12, 0.5), (8, 0.25)], &evaluated);
        assert_eq!(result.font_size, 16, "ties go to the earlier, larger size");
        assert_eq!(result.fit_score, 0.5);
    }

    #[test]
    fn test_search_stops_at_good_fill() {
        let evaluated = RefCell::new(vec![]);
        // 8pt would score higher, but 12pt already reaches 0.7
        let result = scripted_search(&[(16, 0.25), (12, 0.75), (8, 0.875)], &evaluated);
        assert_eq!(result.font_size, 12);
        assert_eq!(result.fit_score, 0.75);
        assert_eq!(*evaluated.borrow(), vec![16, 12]);
    }

    #[test]
    fn test_overflowing_candidates_are_skipped_when_scoring() {
        let evaluated = RefCell::new(vec![]);
        // 16pt overflows the 0.9 margin; its larger raw fill must not win
        let result = scripted_search(&[(16, 0.95), (12, 0.5), (8, 0.25)], &evaluated);
        assert!(result.fitted);
        assert_eq!(result.font_size, 12);
    }

    #[test]
    fn test_fill_ratio_combines_axes() {
        let dims = TextDimensions {
            lines: vec!["abcde".to_string(), "abcde".to_string()],
            line_height: 0.25,
            total_height: 0.5,
            average_line_length: 5.0,
            overflow: false,
        };
        let fill = fill_ratio(&dims, 1.0, 10, &FitTuning::default());
        assert!((fill - 0.75).abs() < 1e-6);
        assert_eq!(fill_ratio(&dims, 1.0, 0, &FitTuning::default()), 0.5);
    }
}
