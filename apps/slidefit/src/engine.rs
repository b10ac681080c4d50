//! Fit orchestrator: the call surface consumed by template and generator code.
//!
//! # Fit pipeline (`fit_text`)
//! 1. Reject degenerate input (empty text, non-positive container).
//! 2. Truncate to the profile's `max_length` when enforcement is on.
//! 3. Search the profile's font sizes.
//! 4. If nothing fits: truncate to 75% of the searched text and search once more,
//!    accepting whatever comes back. Text that is too long is never an error.
//! 5. Place the block in the container and validate it against the canvas,
//!    moving it to the suggested position when it crosses an edge.
//!
//! `FitEngine` holds only immutable, constructor-injected tables, so it is
//! `Send + Sync` and can be shared across threads without locking.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, FitTuning};
use crate::errors::{LayoutError, Result};
use crate::layout::{
    calculate_relationships, create_grid, validate_bounds, BoundsReport, BoundsViolation,
    CanvasLayout, CanvasRegistry, Container, GridCell, GridWeights, RelationshipReport,
    DEFAULT_CANVAS,
};
use crate::text::{
    calculate_text_dimensions, find_optimal_font_size, measure_bullets, retry_budget,
    search_font_size, truncate_text_intelligently, ContentTypeProfile, FitResult,
    MetricsProvider, MetricsTable, ProfileRegistry, TextDimensions,
};

/// Profile used by [`FitEngine::fit_bullets`].
pub const BULLET_PROFILE: &str = "bullet";

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Everything the engine needs, injected once at construction.
#[derive(Clone)]
pub struct EngineConfig {
    pub metrics: Arc<dyn MetricsProvider>,
    pub profiles: ProfileRegistry,
    pub canvases: CanvasRegistry,
    pub tuning: FitTuning,
    /// Canvas used when [`FitOptions::canvas`] is unset.
    pub default_canvas: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            metrics: Arc::new(MetricsTable::standard()),
            profiles: ProfileRegistry::standard(),
            canvases: CanvasRegistry::standard(),
            tuning: FitTuning::default(),
            default_canvas: DEFAULT_CANVAS.to_string(),
        }
    }
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        EngineConfig {
            tuning: config.tuning,
            default_canvas: config.canvas.clone(),
            ..EngineConfig::default()
        }
    }
}

/// Per-call options. Deserializes from a JSON object; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Canvas preset to validate against; the engine default when unset.
    pub canvas: Option<String>,
    pub preserve_words: bool,
    /// Truncate text longer than the profile's `max_length` before fitting.
    pub enforce_max_length: bool,
    /// Truncate and search once more when nothing fits.
    pub retry_truncated: bool,
    /// Move the placed block to the suggested position when it leaves the canvas.
    pub apply_bounds_correction: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            canvas: None,
            preserve_words: true,
            enforce_max_length: true,
            retry_truncated: true,
            apply_bounds_correction: true,
        }
    }
}

impl FitOptions {
    /// Parses an options map such as `{"canvas": "4:3", "preserve_words": false}`.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| LayoutError::Validation(format!("invalid fit options: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// What happened while fitting, for callers that log or surface warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub content_type: String,
    pub canvas: String,
    /// False when even the retry did not fit. The result is still usable.
    pub fitted: bool,
    pub fit_score: f32,
    pub dimensions: Option<TextDimensions>,
    /// Text was shortened (length ceiling or retry).
    pub truncated: bool,
    /// The truncate-and-retry step ran.
    pub retried: bool,
    pub original_length: usize,
    pub final_length: usize,
    /// Canvas edges the uncorrected placement crossed.
    pub bounds_errors: Vec<BoundsViolation>,
    pub bounds_corrected: bool,
}

/// A sized and placed text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedText {
    /// The text to render, possibly truncated.
    pub text: String,
    pub placement: Container,
    pub font_size: u32,
    pub diagnostics: FitDiagnostics,
}

/// A sized and placed bullet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedBullets {
    pub items: Vec<String>,
    pub placement: Container,
    pub font_size: u32,
    pub diagnostics: FitDiagnostics,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Length bookkeeping carried from the truncation steps into the diagnostics.
struct Shortening {
    truncated: bool,
    retried: bool,
    original_length: usize,
    final_length: usize,
}

#[derive(Clone)]
pub struct FitEngine {
    metrics: Arc<dyn MetricsProvider>,
    profiles: ProfileRegistry,
    canvases: CanvasRegistry,
    tuning: FitTuning,
    default_canvas: String,
}

impl Default for FitEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        FitEngine {
            metrics: config.metrics,
            profiles: config.profiles,
            canvases: config.canvases,
            tuning: config.tuning,
            default_canvas: config.default_canvas,
        }
    }
}

impl FitEngine {
    /// Fails when the default canvas is not among the configured canvases.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.canvases.get(&config.default_canvas)?;
        Ok(FitEngine {
            metrics: config.metrics,
            profiles: config.profiles,
            canvases: config.canvases,
            tuning: config.tuning,
            default_canvas: config.default_canvas,
        })
    }

    /// Builds an engine from `.env` / environment configuration.
    pub fn from_env() -> anyhow::Result<Self> {
        use anyhow::Context;

        let config = Config::from_env()?;
        let engine = Self::new(EngineConfig::from(&config))
            .with_context(|| format!("SLIDEFIT_CANVAS '{}' is not a known canvas", config.canvas))?;
        Ok(engine)
    }

    pub fn tuning(&self) -> &FitTuning {
        &self.tuning
    }

    pub fn profile(&self, content_type: &str) -> Result<&ContentTypeProfile> {
        self.profiles.get(content_type)
    }

    pub fn canvas(&self, name: &str) -> Result<&CanvasLayout> {
        self.canvases.get(name)
    }

    fn canvas_for(&self, options: &FitOptions) -> Result<&CanvasLayout> {
        self.canvas(options.canvas.as_deref().unwrap_or(&self.default_canvas))
    }

    /// Fits `text` into `container` using the named content type profile.
    pub fn fit_text(
        &self,
        text: &str,
        container: &Container,
        content_type: &str,
        options: &FitOptions,
    ) -> Result<FittedText> {
        container.ensure_measurable()?;
        if text.trim().is_empty() {
            return Err(LayoutError::DegenerateInput("text is empty".to_string()));
        }
        let profile = self.profile(content_type)?;
        let canvas = self.canvas_for(options)?;

        let original_length = text.chars().count();
        let mut working = text.to_string();
        let mut truncated = false;

        if options.enforce_max_length && original_length > profile.max_length {
            working =
                truncate_text_intelligently(&working, profile.max_length, options.preserve_words);
            truncated = true;
            warn!(
                content_type = %profile.name,
                original_length,
                max_length = profile.max_length,
                "Text exceeds content type length ceiling; truncated"
            );
        }

        let mut result = find_optimal_font_size(
            &working,
            container,
            profile,
            self.metrics.as_ref(),
            &self.tuning,
        )?;
        let mut retried = false;

        if !result.fitted && options.retry_truncated {
            let budget = retry_budget(&working, self.tuning.retry_ratio);
            let shorter = truncate_text_intelligently(&working, budget, options.preserve_words);
            if shorter != working && !shorter.trim().is_empty() {
                warn!(
                    content_type = %profile.name,
                    from = working.chars().count(),
                    to = shorter.chars().count(),
                    "Text does not fit at any admissible size; retrying truncated"
                );
                result = find_optimal_font_size(
                    &shorter,
                    container,
                    profile,
                    self.metrics.as_ref(),
                    &self.tuning,
                )?;
                working = shorter;
                truncated = true;
                retried = true;
            }
        }

        if !result.fitted {
            warn!(
                content_type = %profile.name,
                font_size = result.font_size,
                "Text still overflows container; returning best effort"
            );
        }

        let font_size = result.font_size;
        let final_length = working.chars().count();
        let (placement, diagnostics) = self.place(
            container,
            canvas,
            profile,
            result,
            options,
            Shortening {
                truncated,
                retried,
                original_length,
                final_length,
            },
        );

        debug!(
            content_type = %profile.name,
            font_size,
            fitted = diagnostics.fitted,
            "Text fitted"
        );

        Ok(FittedText {
            text: working,
            placement,
            font_size,
            diagnostics,
        })
    }

    /// Fits a bullet list into `container` with the `bullet` profile.
    ///
    /// Items are measured separately so none shares a line with the next.
    /// On failure every item is cut to 75% of its length for the single retry.
    pub fn fit_bullets<S: AsRef<str>>(
        &self,
        items: &[S],
        container: &Container,
        options: &FitOptions,
    ) -> Result<FittedBullets> {
        container.ensure_measurable()?;
        let mut working: Vec<String> = items
            .iter()
            .map(|item| item.as_ref().trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if working.is_empty() {
            return Err(LayoutError::DegenerateInput(
                "bullet list has no items".to_string(),
            ));
        }
        let profile = self.profile(BULLET_PROFILE)?;
        let canvas = self.canvas_for(options)?;

        let original_length: usize = working.iter().map(|i| i.chars().count()).sum();
        let mut truncated = false;

        if options.enforce_max_length {
            for item in working.iter_mut() {
                if item.chars().count() > profile.max_length {
                    *item =
                        truncate_text_intelligently(item, profile.max_length, options.preserve_words);
                    truncated = true;
                }
            }
        }

        let search = |items: &[String]| {
            search_font_size(
                container,
                profile,
                self.metrics.as_ref(),
                &self.tuning,
                |size_metrics, width| measure_bullets(items, width, size_metrics),
            )
        };

        let mut result = search(working.as_slice())?;
        let mut retried = false;

        if !result.fitted && options.retry_truncated {
            let shorter: Vec<String> = working
                .iter()
                .map(|item| {
                    let budget = retry_budget(item, self.tuning.retry_ratio);
                    truncate_text_intelligently(item, budget, options.preserve_words)
                })
                .collect();
            if shorter != working {
                warn!(
                    items = working.len(),
                    "Bullet list does not fit at any admissible size; retrying truncated"
                );
                result = search(shorter.as_slice())?;
                working = shorter;
                truncated = true;
                retried = true;
            }
        }

        let font_size = result.font_size;
        let final_length: usize = working.iter().map(|i| i.chars().count()).sum();
        let (placement, diagnostics) = self.place(
            container,
            canvas,
            profile,
            result,
            options,
            Shortening {
                truncated,
                retried,
                original_length,
                final_length,
            },
        );

        Ok(FittedBullets {
            items: working,
            placement,
            font_size,
            diagnostics,
        })
    }

    /// Builds the placed element and its diagnostics.
    ///
    /// The element keeps the container's position and width; its height grows
    /// to the text block when the block overflows, so the canvas check sees
    /// the real footprint.
    fn place(
        &self,
        container: &Container,
        canvas: &CanvasLayout,
        profile: &ContentTypeProfile,
        result: FitResult,
        options: &FitOptions,
        shortening: Shortening,
    ) -> (Container, FitDiagnostics) {
        let block_height = result
            .dimensions
            .as_ref()
            .map_or(0.0, |d| d.total_height);
        let mut placement = Container {
            height: container.height.max(block_height),
            ..*container
        };

        let report = validate_bounds(&placement, canvas);
        let mut bounds_corrected = false;
        if let (false, Some(suggestion)) = (report.valid, report.suggestion) {
            warn!(
                canvas = %canvas.name,
                violations = ?report.messages(),
                "Placed block leaves the canvas"
            );
            if options.apply_bounds_correction {
                placement = suggestion;
                bounds_corrected = true;
            }
        }

        let diagnostics = FitDiagnostics {
            content_type: profile.name.clone(),
            canvas: canvas.name.clone(),
            fitted: result.fitted,
            fit_score: result.fit_score,
            dimensions: result.dimensions,
            truncated: shortening.truncated,
            retried: shortening.retried,
            original_length: shortening.original_length,
            final_length: shortening.final_length,
            bounds_errors: report.errors,
            bounds_corrected,
        };
        (placement, diagnostics)
    }

    /// Raw measurement at one font size, no search.
    pub fn measure(&self, text: &str, font_size: u32, width: f32) -> Result<TextDimensions> {
        if text.trim().is_empty() {
            return Err(LayoutError::DegenerateInput("text is empty".to_string()));
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(LayoutError::DegenerateInput(format!(
                "width must be positive, got {width}"
            )));
        }
        let metrics = self.metrics.metrics_for(font_size).ok_or_else(|| {
            LayoutError::Validation(format!(
                "unsupported font size {font_size}; supported sizes are {:?}",
                self.metrics.sizes()
            ))
        })?;
        Ok(calculate_text_dimensions(text, &metrics, width))
    }

    /// Checks a placed element against a named canvas.
    pub fn validate_placement(&self, container: &Container, canvas_name: &str) -> Result<BoundsReport> {
        container.ensure_measurable()?;
        let canvas = self.canvas(canvas_name)?;
        Ok(validate_bounds(container, canvas))
    }

    /// Subdivides `area` into a grid, rejecting shapes that cannot hold any cell.
    pub fn grid(
        &self,
        area: &Container,
        rows: usize,
        cols: usize,
        spacing: f32,
        weights: Option<&GridWeights>,
    ) -> Result<Vec<GridCell>> {
        area.ensure_measurable()?;
        if rows == 0 || cols == 0 {
            return Err(LayoutError::DegenerateInput(format!(
                "grid needs at least one row and column, got {rows} x {cols}"
            )));
        }
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(LayoutError::DegenerateInput(format!(
                "spacing must be non-negative, got {spacing}"
            )));
        }
        let free_width = area.width - spacing * (cols - 1) as f32;
        let free_height = area.height - spacing * (rows - 1) as f32;
        if free_width <= 0.0 || free_height <= 0.0 {
            return Err(LayoutError::DegenerateInput(format!(
                "spacing {spacing} leaves no room for {rows} x {cols} cells"
            )));
        }
        if let Some(weights) = weights {
            let all_valid = weights
                .rows
                .iter()
                .chain(weights.cols.iter())
                .all(|w| w.is_finite() && *w > 0.0);
            if !all_valid {
                return Err(LayoutError::Validation(
                    "grid weights must be positive and finite".to_string(),
                ));
            }
        }

        Ok(create_grid(
            area.width,
            area.height,
            rows,
            cols,
            spacing,
            weights,
            area.x,
            area.y,
        ))
    }

    pub fn relationships(&self, containers: &[Container]) -> RelationshipReport {
        calculate_relationships(containers)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
