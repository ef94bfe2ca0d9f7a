use crate::{Sample, P50, P95};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("Cannot summarize an empty sample set")]
    NoSamples,
}

/// Reduced latency statistics for one endpoint.
///
/// Failed samples count towards every latency figure: a request that errored out still cost
/// the caller that much time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Summary {
    pub avg_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub success_rate_percent: u8,
}

impl Summary {
    /// Folds samples into a summary.
    ///
    /// The input must be non-empty; an empty slice is a caller bug and is reported as
    /// [`StatsError::NoSamples`] rather than as a row of zeros.
    pub fn reduce(samples: &[Sample]) -> Result<Self, StatsError> {
        let mut durations: Vec<u64> = samples.iter().map(|s| s.duration_ms).collect();
        durations.sort_unstable();

        let count = durations.len() as u64;
        let (Some(&min_ms), Some(&max_ms)) = (durations.first(), durations.last()) else {
            return Err(StatsError::NoSamples);
        };

        let sum: u64 = durations.iter().sum();
        let succeeded = samples.iter().filter(|s| s.succeeded).count() as u64;

        Ok(Self {
            avg_ms: div_round(sum, count),
            min_ms,
            max_ms,
            p50_ms: percentile(&durations, P50).ok_or(StatsError::NoSamples)?,
            p95_ms: percentile(&durations, P95).ok_or(StatsError::NoSamples)?,
            success_rate_percent: percent(succeeded, count),
        })
    }

    pub fn tier(&self) -> LatencyTier {
        LatencyTier::classify(self.avg_ms)
    }
}

/// Nearest-rank percentile over an ascending slice: the value at `ceil(p/100 * n) - 1`,
/// clamped into range.
pub fn percentile(sorted: &[u64], p: f64) -> Option<u64> {
    let last = sorted.len().checked_sub(1)?;
    // NOTE: `p * n / 100` keeps integer percentiles exact, unlike `p / 100 * n`.
    let rank = (p * sorted.len() as f64 / 100.).ceil() - 1.;
    let idx = if rank.is_nan() || rank < 0. {
        0
    } else {
        (rank as usize).min(last)
    };
    Some(sorted[idx])
}

/// `part` as a whole-number percentage of `whole`, half rounded up. Zero when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    div_round(100 * part.min(whole), whole) as u8
}

/// Integer division rounding half up.
pub(crate) fn div_round(num: u64, den: u64) -> u64 {
    (2 * num + den) / (2 * den)
}

/// Coarse latency buckets used to colour results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum LatencyTier {
    Fast,
    Moderate,
    Slow,
    Critical,
}

impl LatencyTier {
    pub fn classify(ms: u64) -> Self {
        match ms {
            0..=49 => LatencyTier::Fast,
            50..=149 => LatencyTier::Moderate,
            150..=499 => LatencyTier::Slow,
            _ => LatencyTier::Critical,
        }
    }
}

impl fmt::Display for LatencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LatencyTier::Fast => "fast",
            LatencyTier::Moderate => "moderate",
            LatencyTier::Slow => "slow",
            LatencyTier::Critical => "critical",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn successes(durations: &[u64]) -> Vec<Sample> {
        durations.iter().copied().map(Sample::success).collect()
    }

    #[test]
    fn constant_samples() {
        let summary = Summary::reduce(&successes(&[100, 100, 100])).unwrap();
        assert_eq!(
            summary,
            Summary {
                avg_ms: 100,
                min_ms: 100,
                max_ms: 100,
                p50_ms: 100,
                p95_ms: 100,
                success_rate_percent: 100,
            }
        );
    }

    #[test]
    fn nearest_rank_percentiles() {
        let summary = Summary::reduce(&successes(&[40, 10, 100, 30, 20])).unwrap();
        assert_eq!(summary.p50_ms, 30);
        assert_eq!(summary.p95_ms, 100);
        assert_eq!(summary.min_ms, 10);
        assert_eq!(summary.max_ms, 100);
        assert_eq!(summary.avg_ms, 40);
    }

    #[test]
    fn percentile_edges() {
        assert_eq!(percentile(&[], 50.), None);
        assert_eq!(percentile(&[7], 0.), Some(7));
        assert_eq!(percentile(&[7], 95.), Some(7));
        assert_eq!(percentile(&[1, 2], 50.), Some(1));
        assert_eq!(percentile(&[1, 2], 100.), Some(2));

        // 95% of 20 is exactly 19, so the 19th value (index 18) is the p95.
        let twenty: Vec<u64> = (1..=20).collect();
        assert_eq!(percentile(&twenty, 95.), Some(19));
    }

    #[test]
    fn failures_count_towards_latency() {
        let mut samples = successes(&[10; 7]);
        samples.extend([Sample::failure(40); 3]);
        let summary = Summary::reduce(&samples).unwrap();
        assert_eq!(summary.success_rate_percent, 70);
        assert_eq!(summary.avg_ms, 19);
        assert_eq!(summary.max_ms, 40);
    }

    #[test]
    fn averages_round_half_up() {
        assert_eq!(Summary::reduce(&successes(&[1, 2])).unwrap().avg_ms, 2);
        assert_eq!(Summary::reduce(&successes(&[1, 1, 2])).unwrap().avg_ms, 1);
        let rate = Summary::reduce(&[Sample::success(1), Sample::failure(1), Sample::failure(1)])
            .unwrap()
            .success_rate_percent;
        assert_eq!(rate, 33);
    }

    #[test]
    fn all_failed() {
        let summary = Summary::reduce(&[Sample::failure(3), Sample::failure(5)]).unwrap();
        assert_eq!(summary.success_rate_percent, 0);
        assert_eq!(summary.avg_ms, 4);
    }

    #[test]
    fn empty_is_an_error() {
        assert_eq!(Summary::reduce(&[]), Err(StatsError::NoSamples));
    }

    #[test]
    fn ordering_holds_for_random_inputs() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.gen_range(1..64);
            let samples: Vec<Sample> = (0..len)
                .map(|_| Sample {
                    duration_ms: rng.gen_range(0..2_000),
                    succeeded: rng.gen_bool(0.8),
                })
                .collect();
            let s = Summary::reduce(&samples).unwrap();
            assert!(s.min_ms <= s.p50_ms, "{s:?}");
            assert!(s.p50_ms <= s.p95_ms, "{s:?}");
            assert!(s.p95_ms <= s.max_ms, "{s:?}");
            assert!(s.min_ms <= s.avg_ms && s.avg_ms <= s.max_ms, "{s:?}");
            assert!(s.success_rate_percent <= 100);
        }
    }

    #[test]
    fn percentages() {
        assert_eq!(percent(1, 6), 17);
        assert_eq!(percent(2, 6), 33);
        assert_eq!(percent(6, 6), 100);
        assert_eq!(percent(7, 6), 100);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn tiers() {
        assert_eq!(LatencyTier::classify(0), LatencyTier::Fast);
        assert_eq!(LatencyTier::classify(49), LatencyTier::Fast);
        assert_eq!(LatencyTier::classify(50), LatencyTier::Moderate);
        assert_eq!(LatencyTier::classify(150), LatencyTier::Slow);
        assert_eq!(LatencyTier::classify(500), LatencyTier::Critical);
    }
}
