use crate::{
    aggregate, Comparison, EndpointDescriptor, Registry, Sample, StatsError, Summary,
    DEFAULT_ITERATIONS, DEFAULT_REQUEST_TIMEOUT,
};
#[cfg(feature = "serde")]
use serde::Serialize;
#[allow(unused_imports)]
#[cfg(feature = "serde")]
use serde_with::{serde_as, DurationMilliSeconds};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// What to benchmark, and how many times.
///
/// Ids that are not in the registry are ignored when the run resolves its endpoints; the run
/// always walks endpoints in registry order, whatever order they were selected in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", cfg_eval::cfg_eval, serde_as)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunConfig {
    pub selected: BTreeSet<String>,
    pub iterations: u32,
    #[cfg_attr(feature = "serde", serde_as(as = "Option<DurationMilliSeconds<u64>>"))]
    pub timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl RunConfig {
    pub fn new(iterations: u32) -> Self {
        Self {
            selected: BTreeSet::new(),
            iterations,
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    pub fn select(mut self, id: &str) -> Self {
        self.selected.insert(id.to_string());
        self
    }

    pub fn select_service(mut self, registry: &Registry, service: &str) -> Self {
        self.selected
            .extend(registry.filter_by_service(service).map(|e| e.id.clone()));
        self
    }

    pub fn select_all(mut self, registry: &Registry) -> Self {
        self.selected.extend(registry.list().map(|e| e.id.clone()));
        self
    }

    /// Bound on a single request. `None` waits for as long as the request takes.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// The selected endpoints that exist in `registry`, in registry order.
    pub fn resolve<'a>(&self, registry: &'a Registry) -> Vec<&'a EndpointDescriptor> {
        registry.list().filter(|e| self.is_selected(&e.id)).collect()
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} endpoints x {} iterations, timeout {}",
            self.selected.len(),
            self.iterations,
            self.timeout
                .map(|t| humantime::format_duration(t).to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
    }
}

/// One endpoint's outcome for a run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EndpointResult {
    pub endpoint: EndpointDescriptor,
    pub samples: Vec<Sample>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: Summary,
}

impl EndpointResult {
    pub fn new(endpoint: EndpointDescriptor, samples: Vec<Sample>) -> Result<Self, StatsError> {
        let summary = Summary::reduce(&samples)?;
        Ok(Self {
            endpoint,
            samples,
            summary,
        })
    }

    pub fn service(&self) -> &str {
        &self.endpoint.service_name
    }

    pub fn fully_successful(&self) -> bool {
        self.summary.success_rate_percent == 100
    }
}

impl fmt::Display for EndpointResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        write!(
            f,
            "{}: avg={}ms, min={}ms, p50={}ms, p95={}ms, max={}ms, success={}%",
            self.endpoint, s.avg_ms, s.min_ms, s.p50_ms, s.p95_ms, s.max_ms, s.success_rate_percent
        )
    }
}

/// A completed run. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", cfg_eval::cfg_eval, serde_as)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunResult {
    pub config: RunConfig,
    /// One entry per selected endpoint, in registry order.
    pub results: Vec<EndpointResult>,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMilliSeconds<u64>"))]
    pub elapsed: Duration,
}

impl RunResult {
    pub fn comparison(&self) -> Comparison {
        aggregate(&self.results)
    }

    pub fn total_requests(&self) -> usize {
        self.results.iter().map(|r| r.samples.len()).sum()
    }

    pub fn fully_successful_endpoints(&self) -> usize {
        self.results.iter().filter(|r| r.fully_successful()).count()
    }

    /// Largest single latency of the run, the natural scale for charting every endpoint.
    pub fn max_latency_ms(&self) -> Option<u64> {
        self.results.iter().map(|r| r.summary.max_ms).max()
    }
}
