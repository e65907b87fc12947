//! Tick positions, contour levels and tick labels
//!
//! Positions come from the key points of `plotters` coordinate ranges, so
//! linear axes step by 1, 2 or 5 times a power of ten and log axes mark whole
//! decades. Labels use the `plotters` float pretty printer.

use plotters::coord::combinators::{IntoLogRange, LogCoord};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::data::float::FloatPrettyPrinter;

// Requested key points for log axes; large enough that every decade is
// subdivided at its integer multiples
const LOG_KEY_POINTS: usize = 100;

// Relative tolerance on log-axis limits
const RANGE_SLACK: f64 = 1e-9;

const LABEL_PRINTER: FloatPrettyPrinter = FloatPrettyPrinter {
    allow_scientific: true,
    min_decimal: 0,
    max_decimal: 10,
};

/// Major and minor tick values of a logarithmic axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTicks {
    /// Labelled ticks
    pub major: Vec<f64>,
    /// Unlabelled ticks between the major ones
    pub minor: Vec<f64>,
}

/// Round values inside `[min, max]`, at most `max_points` of them
///
/// Returns an empty vector for inverted or non-finite ranges and a single
/// value when `min == max`.
pub fn linear_ticks(min: f64, max: f64, max_points: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max < min || max_points == 0 {
        return Vec::new();
    }
    if max == min {
        return vec![min];
    }

    let quantum = (max - min) * 1e-9;
    RangedCoordf64::from(min..max)
        .key_points(max_points)
        .into_iter()
        .map(|value| if value.abs() < quantum { 0.0 } else { value })
        .collect()
}

/// Contour levels strictly inside the open range `(min, max)`
///
/// Levels are the ticks of at most `max_bins` intervals; values equal to the
/// range ends are dropped since they would trace the field's extrema.
pub fn contour_levels(min: f64, max: f64, max_bins: usize) -> Vec<f64> {
    linear_ticks(min, max, max_bins + 1)
        .into_iter()
        .filter(|&level| level > min && level < max)
        .collect()
}

/// Tick values for a logarithmic axis over `[min, max]` (both positive)
///
/// Whole decades are major ticks and their integer multiples minor ticks.
/// When fewer than two decades fall in the range, linear ticks of at most
/// `max_points` values are used instead and there are no minor ticks.
pub fn log_ticks(min: f64, max: f64, max_points: usize) -> LogTicks {
    if min.is_nan() || min <= 0.0 || !max.is_finite() || max <= min {
        return LogTicks::default();
    }

    // Widened so that limits a rounding error away from a decade keep it
    let (lo, hi) = (min * (1.0 - RANGE_SLACK), max * (1.0 + RANGE_SLACK));
    let coord: LogCoord<f64> = (lo..hi).log_scale().into();
    let mut points = coord.key_points(LOG_KEY_POINTS);
    points.retain(|&value| value >= lo && value <= hi);
    points.sort_by(f64::total_cmp);
    points.dedup_by(|a, b| (*a - *b).abs() <= b.abs() * 1e-9);

    let (major, rest): (Vec<f64>, Vec<f64>) = points
        .into_iter()
        .partition(|&value| decade_exponent(value).is_some());
    if major.len() < 2 {
        return LogTicks {
            major: linear_ticks(min, max, max_points),
            minor: Vec::new(),
        };
    }

    // Denser hints subdivide decades in tenths; keep the integer multiples
    let minor = rest
        .into_iter()
        .filter(|&value| {
            let mantissa = value / 10f64.powf(value.log10().floor());
            (mantissa - mantissa.round()).abs() < 1e-6
        })
        .collect();
    LogTicks { major, minor }
}

/// Shortest label for a tick value
///
/// Values of a thousand or more, or below a hundredth, switch to scientific
/// notation such as `1.5e-5` when that is shorter.
pub fn format_tick(value: f64) -> String {
    LABEL_PRINTER.print(value)
}

/// Decimal exponent of a power of ten, or `None` for other values
pub fn decade_exponent(value: f64) -> Option<i32> {
    if value.is_nan() || value <= 0.0 {
        return None;
    }
    let exponent = value.log10().round();
    let power = 10f64.powf(exponent);
    ((value - power).abs() <= power * 1e-9).then_some(exponent as i32)
}
