//! Twelve-slot per-month values.

use serde::Serialize;
use std::ops::{Add, Index, IndexMut};

use crate::constants::MONTHS_PER_YEAR;

/// One value per calendar month, January at index 0.
///
/// Holds average hours when produced by the window engine and day counts when
/// produced by the instant classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlyAggregate([f64; MONTHS_PER_YEAR]);

impl MonthlyAggregate {
    pub fn new(values: [f64; MONTHS_PER_YEAR]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Plain sum over the months (day counts).
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Sum of each month's value times its number of days (averages → yearly total).
    pub fn weighted_total(&self, month_lengths: &[u32; MONTHS_PER_YEAR]) -> f64 {
        self.0
            .iter()
            .zip(month_lengths)
            .map(|(value, days)| value * f64::from(*days))
            .sum()
    }

    /// Means from per-month sums and counts; empty months become zero.
    pub(crate) fn from_sums(
        sums: [f64; MONTHS_PER_YEAR],
        counts: [usize; MONTHS_PER_YEAR],
        scale: f64,
    ) -> Self {
        let mut out = [0.0; MONTHS_PER_YEAR];
        for (month, slot) in out.iter_mut().enumerate() {
            if counts[month] > 0 {
                *slot = sums[month] / counts[month] as f64 / scale;
            }
        }
        Self(out)
    }
}

/// Element-wise sum, used to combine the two halves of a split window.
impl Add for MonthlyAggregate {
    type Output = MonthlyAggregate;

    fn add(mut self, other: MonthlyAggregate) -> MonthlyAggregate {
        for (slot, value) in self.0.iter_mut().zip(other.0) {
            *slot += value;
        }
        self
    }
}

impl Index<usize> for MonthlyAggregate {
    type Output = f64;

    fn index(&self, month: usize) -> &f64 {
        &self.0[month]
    }
}

impl IndexMut<usize> for MonthlyAggregate {
    fn index_mut(&mut self, month: usize) -> &mut f64 {
        &mut self.0[month]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_total_uses_month_lengths() {
        let hours = MonthlyAggregate::new([1.0; 12]);
        let lengths = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        assert_eq!(hours.weighted_total(&lengths), 365.0);
        assert_eq!(hours.total(), 12.0);
    }

    #[test]
    fn test_from_sums_never_divides_by_zero() {
        let mut sums = [0.0; 12];
        let mut counts = [0; 12];
        sums[0] = 7200.0 * 31.0;
        counts[0] = 31;
        let means = MonthlyAggregate::from_sums(sums, counts, 3600.0);
        assert_eq!(means[0], 2.0);
        assert!(means.iter().skip(1).all(|v| v == 0.0));
    }

    #[test]
    fn test_add_is_elementwise() {
        let mut a = MonthlyAggregate::default();
        a[3] = 1.5;
        let b = MonthlyAggregate::new([0.5; 12]);
        let sum = a + b;
        assert_eq!(sum[3], 2.0);
        assert_eq!(sum[0], 0.5);
    }
}
