use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Numeric knobs of the font-size search and the fit-failure policy.
///
/// The defaults are the calibrated values; override them only when swapping in
/// a different metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitTuning {
    /// Fraction of the profile's max font size the search starts from.
    pub size_ceiling: f32,
    /// Font-size units per length unit, used to cap the start size by container height.
    pub points_per_unit: f32,
    /// Downward step between candidate sizes.
    pub size_step: u32,
    /// A block fits when `total_height <= container.height * height_safety`.
    pub height_safety: f32,
    /// Fill ratio at which the search stops early.
    pub good_fill: f32,
    /// Weight of horizontal utilization in the fill ratio.
    pub horizontal_weight: f32,
    /// Fraction of the original length kept when retrying an unfittable text.
    pub retry_ratio: f32,
}

impl Default for FitTuning {
    fn default() -> Self {
        FitTuning {
            size_ceiling: 0.8,
            points_per_unit: 72.0,
            size_step: 4,
            height_safety: 0.9,
            good_fill: 0.7,
            horizontal_weight: 0.5,
            retry_ratio: 0.75,
        }
    }
}

/// Engine configuration loaded from environment variables.
/// Every variable is optional; missing ones fall back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Canvas preset used when a call does not name one.
    pub canvas: String,
    pub rust_log: String,
    pub tuning: FitTuning,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            canvas: crate::layout::DEFAULT_CANVAS.to_string(),
            rust_log: "info".to_string(),
            tuning: FitTuning::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = FitTuning::default();

        Ok(Config {
            canvas: lookup("SLIDEFIT_CANVAS")
                .unwrap_or_else(|| crate::layout::DEFAULT_CANVAS.to_string()),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            tuning: FitTuning {
                size_ceiling: parse_or(&lookup, "SLIDEFIT_SIZE_CEILING", defaults.size_ceiling)?,
                points_per_unit: parse_or(
                    &lookup,
                    "SLIDEFIT_POINTS_PER_UNIT",
                    defaults.points_per_unit,
                )?,
                size_step: parse_or(&lookup, "SLIDEFIT_SIZE_STEP", defaults.size_step)?,
                height_safety: parse_or(
                    &lookup,
                    "SLIDEFIT_HEIGHT_SAFETY",
                    defaults.height_safety,
                )?,
                good_fill: parse_or(&lookup, "SLIDEFIT_GOOD_FILL", defaults.good_fill)?,
                horizontal_weight: parse_or(
                    &lookup,
                    "SLIDEFIT_HORIZONTAL_WEIGHT",
                    defaults.horizontal_weight,
                )?,
                retry_ratio: parse_or(&lookup, "SLIDEFIT_RETRY_RATIO", defaults.retry_ratio)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
