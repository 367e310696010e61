//! Index-aligned rolling windows.
//!
//! Every helper returns one output per input index. Indices whose window is
//! not full (or, for [`rolling_defined`], contains an undefined input) come
//! out as `None`.

use crate::types::IndicatorSeries;

/// Apply `f` to each trailing window of `period` values.
pub fn rolling<F>(values: &[f64], period: usize, f: F) -> IndicatorSeries
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if period == 0 {
        return IndicatorSeries::undefined(values.len());
    }

    let out = (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                f(&values[i + 1 - period..=i])
            }
        })
        .collect();

    IndicatorSeries::new(out)
}

/// Like [`rolling`], over inputs that may themselves be undefined.
pub fn rolling_defined<F>(values: &[Option<f64>], period: usize, f: F) -> IndicatorSeries
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if period == 0 {
        return IndicatorSeries::undefined(values.len());
    }

    let mut window = Vec::with_capacity(period);
    let out = (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            window.clear();
            for value in &values[i + 1 - period..=i] {
                window.push((*value)?);
            }
            f(&window)
        })
        .collect();

    IndicatorSeries::new(out)
}

/// Apply `f` to a window of `width` values centered on each index.
///
/// For index `i` the window spans `i - width/2 ..= i + (width-1)/2`, so even
/// widths lean one bar into the past. Windows that would run off either end
/// of the input are not evaluated.
pub fn centered<F>(values: &[f64], width: usize, f: F) -> IndicatorSeries
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if width == 0 {
        return IndicatorSeries::undefined(values.len());
    }

    let behind = width / 2;
    let ahead = (width - 1) / 2;

    let out = (0..values.len())
        .map(|i| {
            if i < behind || i + ahead >= values.len() {
                None
            } else {
                f(&values[i - behind..=i + ahead])
            }
        })
        .collect();

    IndicatorSeries::new(out)
}

/// Arithmetic mean. A window of identical values yields that value exactly.
pub fn mean(window: &[f64]) -> Option<f64> {
    let first = *window.first()?;
    if is_constant(window) {
        return Some(first);
    }
    let avg = window.iter().sum::<f64>() / window.len() as f64;
    avg.is_finite().then_some(avg)
}

/// Sample standard deviation (n - 1 denominator). Exactly 0 for a window of
/// identical values.
pub fn sample_std(window: &[f64]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }
    if is_constant(window) {
        return Some(0.0);
    }
    let avg = mean(window)?;
    let variance =
        window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (window.len() - 1) as f64;
    let std = variance.sqrt();
    std.is_finite().then_some(std)
}

fn is_constant(window: &[f64]) -> bool {
    window.iter().all(|v| *v == window[0])
}

pub fn max(window: &[f64]) -> Option<f64> {
    window.iter().copied().reduce(f64::max)
}

pub fn min(window: &[f64]) -> Option<f64> {
    window.iter().copied().reduce(f64::min)
}
