use crate::log::WaveTable;
use crate::stats::StatsSummary;

/// Summary of wave durations; `None` when the log had no `W` rows.
pub fn aggregate_waves(waves: &WaveTable) -> Option<StatsSummary> {
    let durations: Vec<u64> = waves.iter().map(|w| w.duration).collect();
    StatsSummary::compute(&durations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::row::WaveRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_table_has_no_summary() {
        assert_eq!(aggregate_waves(&Vec::new()), None);
    }

    #[test]
    fn single_wave() {
        let s = aggregate_waves(&vec![WaveRecord {
            wave_num: 0,
            duration: 1234,
        }])
        .unwrap();

        assert_eq!(s.mean, 1234.0);
        assert_eq!(s.median, 1234.0);
        assert_eq!(s.min, 1234);
        assert_eq!(s.max, 1234);
        assert_eq!(s.std, 0.0);
    }

    #[test]
    fn uses_duration_column_only() {
        let waves = (0..4)
            .map(|i| WaveRecord {
                wave_num: 1000 + i,
                duration: 10 * (i + 1),
            })
            .collect();
        let s = aggregate_waves(&waves).unwrap();

        assert_eq!(s.mean, 25.0);
        assert_eq!(s.median, 25.0);
        assert_eq!(s.min, 10);
        assert_eq!(s.max, 40);
    }
}
