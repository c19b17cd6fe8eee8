//! Descriptive statistics over a duration column.

use serde::Serialize;

/// Summary of a non-empty sequence of durations.
///
/// `std` is the population standard deviation (divides by N).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: u64,
    pub max: u64,
}

impl StatsSummary {
    /// Returns `None` for an empty sequence.
    pub fn compute(values: &[u64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let min = sorted[0];
        let max = sorted[n - 1];

        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
        };

        let sum: u128 = sorted.iter().map(|&v| v as u128).sum();
        // Rounding of huge sums must not push the mean outside [min, max].
        let mean = (sum as f64 / n as f64).clamp(min as f64, max as f64);

        let var = sorted
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n as f64;

        Some(Self {
            mean,
            median,
            std: var.sqrt(),
            min,
            max,
        })
    }
}
