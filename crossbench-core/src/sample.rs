#[cfg(feature = "serde")]
use serde::Serialize;
use std::time::Duration;

/// One timed, single-attempt request.
///
/// `succeeded` means a response arrived, whatever its status code. A 5xx still completed the
/// round trip and its latency is as meaningful as a 200's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Sample {
    pub duration_ms: u64,
    pub succeeded: bool,
}

impl Sample {
    pub fn new(elapsed: Duration, succeeded: bool) -> Self {
        Self {
            duration_ms: round_millis(elapsed),
            succeeded,
        }
    }

    pub fn success(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            succeeded: true,
        }
    }

    pub fn failure(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            succeeded: false,
        }
    }
}

/// Whole milliseconds, half rounded up.
pub fn round_millis(elapsed: Duration) -> u64 {
    ((elapsed.as_nanos() + 500_000) / 1_000_000) as u64
}
