/// Equal-width histogram of one duration column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub lo: f64,
    /// Right edge of the last bin.
    pub hi: f64,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning [min, max].
    ///
    /// Bins are left-closed; the right edge belongs to the last bin. When
    /// every value is equal the range is widened to [v - 0.5, v + 0.5] and
    /// all values land in the middle bin (`bins / 2`).
    ///
    /// Returns `None` for an empty column or `bins == 0`.
    pub fn from_values(values: &[u64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;

        let mut counts = vec![0u64; bins];

        if min == max {
            counts[bins / 2] = values.len() as u64;
            return Some(Self {
                lo: min as f64 - 0.5,
                hi: max as f64 + 0.5,
                counts,
            });
        }

        let span = (max - min) as u128;
        for &v in values {
            let idx = ((v - min) as u128 * bins as u128 / span) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Some(Self {
            lo: min as f64,
            hi: max as f64,
            counts,
        })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of bins with at least one value.
    pub fn populated(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_values_fill_exactly_one_bin() {
        let h = Histogram::from_values(&[77; 20], 20).unwrap();

        assert_eq!(h.populated(), 1);
        assert_eq!(h.counts[10], 20);
        assert_eq!(h.total(), 20);
        assert_eq!(h.lo, 76.5);
        assert_eq!(h.hi, 77.5);
    }

    #[test]
    fn empty_column_has_no_histogram() {
        assert_eq!(Histogram::from_values(&[], 20), None);
    }

    #[test]
    fn zero_bins_has_no_histogram() {
        assert_eq!(Histogram::from_values(&[1, 2], 0), None);
    }

    #[test]
    fn max_value_lands_in_last_bin() {
        let h = Histogram::from_values(&[0, 5, 10], 2).unwrap();
        assert_eq!(h.counts, vec![1, 2]);
    }

    #[test]
    fn spreads_values_over_equal_width_bins() {
        let values: Vec<u64> = (0..=19).collect();
        let h = Histogram::from_values(&values, 20).unwrap();

        assert_eq!(h.lo, 0.0);
        assert_eq!(h.hi, 19.0);
        assert_eq!(h.counts, vec![1; 20]);
    }

    #[test]
    fn huge_range_does_not_overflow() {
        let h = Histogram::from_values(&[0, u64::MAX / 2, u64::MAX], 20).unwrap();
        assert_eq!(h.total(), 3);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[9], 1);
        assert_eq!(h.counts[19], 1);
    }
}
