//! Box-plot statistics: quantiles, quartile summaries and extents.
//!
//! Quantiles use linear interpolation between order statistics (the R-7
//! method), so `quantile(&[1.0, 2.0, 3.0, 4.0], 0.5)` is `2.5`.

use serde::Serialize;

use crate::data::model::{DataError, Dataset, Row};
use crate::data::partition::Groups;

/// Distance of the whisker bounds from the box, in IQRs.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Quantiles
// ---------------------------------------------------------------------------

/// Quantile `p` of values sorted in ascending order.
///
/// The rank is `p * (n - 1)`; fractional ranks interpolate between the two
/// neighbouring values. `p <= 0` gives the minimum and `p >= 1` the maximum.
///
/// Returns `None` for an empty slice or a NaN `p`.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n < 2 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }

    let rank = p * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let low_value = sorted[lower];
    Some(low_value + (rank - lower as f64) * (sorted[upper] - low_value))
}

/// Sort observations ascending, dropping NaN sentinels and infinities.
pub fn sorted_observations<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Smallest and largest finite observation.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Quartiles and whisker bounds of one group.
///
/// The whiskers are fences at `1.5 * iqr` beyond the box. They are not
/// clipped to the most extreme observation, and observations beyond them get
/// no separate treatment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
}

impl Summary {
    /// Summarise a group of observations in any order.
    ///
    /// NaN and infinite observations are skipped. Returns `None` when
    /// nothing is left.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_sorted(&sorted_observations(values))
    }

    /// Summarise observations already sorted ascending, all finite.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted.iter().all(|v| v.is_finite()),
            "observations must be finite"
        );
        debug_assert!(
            sorted.windows(2).all(|w| w[0] <= w[1]),
            "observations must be sorted ascending"
        );
        let q1 = quantile(sorted, 0.25)?;
        let median = quantile(sorted, 0.5)?;
        let q3 = quantile(sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Summary {
            q1,
            median,
            q3,
            iqr,
            lower_whisker: q1 - WHISKER_IQR_FACTOR * iqr,
            upper_whisker: q3 + WHISKER_IQR_FACTOR * iqr,
        })
    }
}

/// Summarise a numeric column for every group, keeping group order.
///
/// Groups with no usable observations map to `None`.
pub fn summarize(
    dataset: &Dataset,
    groups: &Groups<&Row>,
    column: &str,
) -> Result<Vec<(String, Option<Summary>)>, DataError> {
    let idx = dataset.require_column(column)?;
    Ok(groups.map_values(|rows| {
        Summary::from_values(
            rows.iter()
                .map(|row| row.get(idx).as_f64().unwrap_or(f64::NAN)),
        )
    }))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn observations() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(-1.0e6f64..1.0e6, 1..200)
    }

    proptest! {
        /// Property: quartiles are ordered and the IQR is never negative
        #[test]
        fn quartiles_are_ordered(values in observations()) {
            let s = Summary::from_values(values.clone()).unwrap();
            prop_assert!(s.q1 <= s.median, "q1 {} > median {}", s.q1, s.median);
            prop_assert!(s.median <= s.q3, "median {} > q3 {}", s.median, s.q3);
            prop_assert!(s.iqr >= 0.0);
            prop_assert!(s.lower_whisker <= s.q1);
            prop_assert!(s.upper_whisker >= s.q3);
        }

        /// Property: the 0.5 quantile is the conventional median
        #[test]
        fn half_quantile_is_median(values in observations()) {
            let sorted = sorted_observations(values);
            let n = sorted.len();
            let expected = if n % 2 == 1 {
                sorted[n / 2]
            } else {
                (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
            };
            let median = quantile(&sorted, 0.5).unwrap();
            prop_assert!(
                (median - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                "median {} != {}", median, expected
            );
        }

        /// Property: quartiles stay inside the observed extent
        #[test]
        fn quartiles_within_extent(values in observations()) {
            let (lo, hi) = extent(values.iter().copied()).unwrap();
            let s = Summary::from_values(values).unwrap();
            prop_assert!(lo <= s.q1 && s.q3 <= hi);
        }
    }
}
