//! Stateless numeric helpers: percentages, ratios, binned medians, and parent indices.
//!
//! None of these panic or produce NaN/Inf on a zero denominator; they degrade
//! to `0.0` or `None` instead, since small geographies routinely have zero of
//! some category.

use crate::error::StatsError;

/// Decimal places used for every rounded percentage and ratio.
pub const PRECISION: i32 = 2;

/// Round half away from zero to `places` decimals.
pub fn round_to(x: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (x * factor).round() / factor
}

fn usable(d: f64) -> bool {
    d != 0.0 && d.is_finite()
}

/// `numerator / denominator * 100`, rounded to two places; `0.0` when the denominator is zero.
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    if !usable(denominator) {
        return 0.0;
    }
    round_to(numerator / denominator * 100.0, PRECISION)
}

/// `a / b` rounded to two places; `None` when `b` is zero.
///
/// Used for "people per facility" metrics, where zero facilities makes the
/// ratio meaningless rather than infinite.
pub fn ratio(a: f64, b: f64) -> Option<f64> {
    usable(b).then(|| round_to(a / b, PRECISION))
}

/// Count per square kilometre; `None` without a usable area.
pub fn per_square_km(count: f64, square_kms: Option<f64>) -> Option<f64> {
    square_kms.filter(|a| usable(*a) && *a > 0.0).map(|a| count / a)
}

/// Median of a binned distribution.
///
/// `bins` are `(bin_value, count)` pairs sorted ascending by `bin_value`, and
/// `total` is the sum of the counts. Walks the cumulative count against
/// `total / 2`:
/// - a bin whose cumulative count lands exactly on the half is averaged with
///   the next bin, whatever that bin's count;
/// - a bin that passes the half by exactly one count is averaged with the
///   previous bin;
/// - any other bin passing the half is the median.
///
/// Fails with [`StatsError::InsufficientData`] when `total` is zero, the bins
/// never reach the half, or the half lands on the last bin.
pub fn median_of_binned(bins: &[(f64, f64)], total: f64) -> Result<f64, StatsError> {
    if !(total > 0.0) || !total.is_finite() {
        return Err(StatsError::InsufficientData(
            "median over an empty distribution".into(),
        ));
    }

    let half = total / 2.0;
    let mut cumulative = 0.0;
    for (i, &(value, count)) in bins.iter().enumerate() {
        cumulative += count;
        if cumulative > half {
            if cumulative - half == 1.0 && i > 0 {
                return Ok((bins[i - 1].0 + value) / 2.0);
            }
            return Ok(value);
        } else if cumulative == half {
            return match bins.get(i + 1) {
                Some(&(next, _)) => Ok((value + next) / 2.0),
                None => Err(StatsError::InsufficientData(format!(
                    "half of {total} reached at the last bin"
                ))),
            };
        }
    }
    Err(StatsError::InsufficientData(format!(
        "bins sum to {cumulative}, below half of {total}"
    )))
}

/// Index of `this` relative to a parent-level value, e.g. `124.0` for 24% above.
///
/// `None` when either side is zero or the index rounds to zero.
pub fn index_ratio(this: f64, parent: f64) -> Option<f64> {
    if !usable(this) || !usable(parent) {
        return None;
    }
    let index = round_to(round_to(this / parent, PRECISION) * 100.0, 1);
    (index != 0.0).then_some(index)
}
