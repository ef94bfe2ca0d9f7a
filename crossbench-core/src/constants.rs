use std::time::Duration;

/// Iteration count used when the caller does not pick one.
pub const DEFAULT_ITERATIONS: u32 = 5;

/// Upper bound offered by the interactive picker. The engine itself only requires `>= 1`.
pub const MAX_SUGGESTED_ITERATIONS: u32 = 50;

/// Default bound on a single request. A request still pending after this long is recorded as a
/// failed sample.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Median, as reported in every endpoint summary.
pub const P50: f64 = 50.;

/// Tail latency, as reported in every endpoint summary.
pub const P95: f64 = 95.;
