//! Static font-size metric table.
//!
//! Every value is a length in canvas units (inches for the built-in presets)
//! at the given point size. This is an intentional approximation: a single
//! average character width per size, no per-glyph advances, no kerning. The
//! search's 10% height safety margin absorbs the residual error.
//!
//! The table sits behind [`MetricsProvider`] so a real shaping backend can
//! replace it without touching the search.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Metrics of one supported font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizeMetrics {
    pub size: u32,
    /// Baseline-to-baseline distance.
    pub line_height: f32,
    /// Average advance of one character.
    pub char_width: f32,
    pub descender: f32,
}

impl FontSizeMetrics {
    /// Number of whole characters that fit in `width`.
    ///
    /// Zero for non-positive or non-finite widths; at least one for any positive width.
    pub fn max_chars_per_line(&self, width: f32) -> usize {
        if !width.is_finite() || width <= 0.0 || self.char_width <= 0.0 {
            return 0;
        }
        ((width / self.char_width).floor() as usize).max(1)
    }
}

/// Source of font-size metrics.
///
/// The engine holds one behind an `Arc<dyn MetricsProvider>`; the default is
/// [`MetricsTable::standard`].
pub trait MetricsProvider: Send + Sync {
    /// Metrics for an exact supported size, `None` for any other size.
    fn metrics_for(&self, size: u32) -> Option<FontSizeMetrics>;

    /// All supported sizes in ascending order.
    fn sizes(&self) -> Vec<u32>;

    /// Largest supported size `<= size`.
    fn snap_down(&self, size: u32) -> Option<u32> {
        self.sizes().into_iter().filter(|s| *s <= size).max()
    }

    /// Smallest supported size `>= size`.
    fn snap_up(&self, size: u32) -> Option<u32> {
        self.sizes().into_iter().filter(|s| *s >= size).min()
    }
}

/// In-memory metrics table, sorted by size.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    entries: Vec<FontSizeMetrics>,
}

impl MetricsTable {
    /// The calibrated table: every even size from 6pt to 72pt.
    pub fn standard() -> Self {
        MetricsTable {
            entries: STANDARD_METRICS.to_vec(),
        }
    }

    /// Builds a table from custom entries. Duplicate sizes keep the last entry.
    pub fn from_entries(entries: impl IntoIterator<Item = FontSizeMetrics>) -> Self {
        let mut entries: Vec<FontSizeMetrics> = entries.into_iter().collect();
        entries.sort_by_key(|e| e.size);
        entries.reverse();
        entries.dedup_by_key(|e| e.size);
        entries.reverse();
        MetricsTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MetricsTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl MetricsProvider for MetricsTable {
    fn metrics_for(&self, size: u32) -> Option<FontSizeMetrics> {
        self.entries
            .binary_search_by_key(&size, |e| e.size)
            .ok()
            .map(|i| self.entries[i])
    }

    fn sizes(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.size).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Calibration data
// ────────────────────────────────────────────────────────────────────────────

const fn m(size: u32, line_height: f32, char_width: f32, descender: f32) -> FontSizeMetrics {
    FontSizeMetrics {
        size,
        line_height,
        char_width,
        descender,
    }
}

/// Line height is 1.2em, average character width 0.39em, descender 0.2em,
/// all converted to inches at 72pt per inch.
#[rustfmt::skip]
static STANDARD_METRICS: [FontSizeMetrics; 34] = [
    //  size  line_h  char_w  desc
    m( 6, 0.1000, 0.0325, 0.0167),
    m( 8, 0.1333, 0.0433, 0.0222),
    m(10, 0.1667, 0.0542, 0.0278),
    m(12, 0.2000, 0.0650, 0.0333),
    m(14, 0.2333, 0.0758, 0.0389),
    m(16, 0.2667, 0.0867, 0.0444),
    m(18, 0.3000, 0.0975, 0.0500),
    m(20, 0.3333, 0.1083, 0.0556),
    m(22, 0.3667, 0.1192, 0.0611),
    m(24, 0.4000, 0.1300, 0.0667),
    m(26, 0.4333, 0.1408, 0.0722),
    m(28, 0.4667, 0.1517, 0.0778),
    m(30, 0.5000, 0.1625, 0.0833),
    m(32, 0.5333, 0.1733, 0.0889),
    m(34, 0.5667, 0.1842, 0.0944),
    m(36, 0.6000, 0.1950, 0.1000),
    m(38, 0.6333, 0.2058, 0.1056),
    m(40, 0.6667, 0.2167, 0.1111),
    m(42, 0.7000, 0.2275, 0.1167),
    m(44, 0.7333, 0.2383, 0.1222),
    m(46, 0.7667, 0.2492, 0.1278),
    m(48, 0.8000, 0.2600, 0.1333),
    m(50, 0.8333, 0.2708, 0.1389),
    m(52, 0.8667, 0.2817, 0.1444),
    m(54, 0.9000, 0.2925, 0.1500),
    m(56, 0.9333, 0.3033, 0.1556),
    m(58, 0.9667, 0.3142, 0.1611),
    m(60, 1.0000, 0.3250, 0.1667),
    m(62, 1.0333, 0.3358, 0.1722),
    m(64, 1.0667, 0.3467, 0.1778),
    m(66, 1.1000, 0.3575, 0.1833),
    m(68, 1.1333, 0.3683, 0.1889),
    m(70, 1.1667, 0.3792, 0.1944),
    m(72, 1.2000, 0.3900, 0.2000),
];

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_even_sizes() {
        let table = MetricsTable::standard();
        assert_eq!(table.len(), 34);
        assert_eq!(table.sizes().first(), Some(&6));
        assert_eq!(table.sizes().last(), Some(&72));
        assert!(table.sizes().iter().all(|s| s % 2 == 0));
    }

    #[test]
    fn test_intermediate_sizes_are_not_interpolated() {
        let table = MetricsTable::standard();
        assert!(table.metrics_for(13).is_none());
        assert!(table.metrics_for(80).is_none());
        let twelve = table.metrics_for(12).expect("12pt is supported");
        assert!((twelve.char_width - 0.065).abs() < 1e-6);
    }

    #[test]
    fn test_metrics_grow_with_size() {
        let table = MetricsTable::standard();
        let sizes = table.sizes();
        for pair in sizes.windows(2) {
            let small = table.metrics_for(pair[0]).unwrap();
            let large = table.metrics_for(pair[1]).unwrap();
            assert!(large.line_height > small.line_height);
            assert!(large.char_width > small.char_width);
            assert!(large.descender > small.descender);
        }
    }

    #[test]
    fn test_snap_down_and_up() {
        let table = MetricsTable::standard();
        assert_eq!(table.snap_down(43), Some(42));
        assert_eq!(table.snap_down(44), Some(44));
        assert_eq!(table.snap_down(5), None);
        assert_eq!(table.snap_up(5), Some(6));
        assert_eq!(table.snap_up(73), None);
    }

    #[test]
    fn test_max_chars_per_line() {
        let twelve = MetricsTable::standard().metrics_for(12).unwrap();
        assert_eq!(twelve.max_chars_per_line(2.0), 30);
        assert_eq!(twelve.max_chars_per_line(0.0), 0);
        assert_eq!(twelve.max_chars_per_line(-1.0), 0);
        assert_eq!(twelve.max_chars_per_line(f32::NAN), 0);
        // narrower than one character still places one character per line
        assert_eq!(twelve.max_chars_per_line(0.01), 1);
    }

    #[test]
    fn test_custom_table_sorts_and_dedups() {
        let table = MetricsTable::from_entries(vec![
            m(20, 0.3, 0.1, 0.05),
            m(10, 0.15, 0.05, 0.02),
            m(20, 0.35, 0.11, 0.06),
        ]);
        assert_eq!(table.sizes(), vec![10, 20]);
        let twenty = table.metrics_for(20).unwrap();
        assert!((twenty.line_height - 0.35).abs() < 1e-6, "last duplicate wins");
    }
}
