//! Drives a run: one endpoint after another, one request at a time.
use crate::collector::Collector;
use crate::fetch::Fetch;
use crossbench_core::{percent, EndpointResult, Registry, RunConfig, RunResult, StatsError};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn};

/// Reasons a run did not produce a result. Every rejection happens before the first request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("No benchmarkable endpoint selected")]
    EmptySelection,

    #[error("Iterations must be at least 1")]
    ZeroIterations,

    #[error("A run is already in progress")]
    AlreadyRunning,

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),
}

/// Samples completed so far across the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: u64,
    pub total: u64,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        percent(self.done, self.total)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.done, self.total, self.percent())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running(Progress),
    Completed { endpoints: usize, elapsed: Duration },
}

/// Owns the registry and the fetch capability, and runs benchmarks against them.
///
/// At most one run is in flight at a time; a second [`Orchestrator::run`] while one is active
/// is rejected with [`RunError::AlreadyRunning`] and leaves the active run untouched.
pub struct Orchestrator<F> {
    registry: Registry,
    fetcher: F,
    running: AtomicBool,
    phase: watch::Sender<RunPhase>,
}

impl<F: Fetch> Orchestrator<F> {
    pub fn new(registry: Registry, fetcher: F) -> Self {
        let (phase, _) = watch::channel(RunPhase::Idle);
        Self {
            registry,
            fetcher,
            running: AtomicBool::new(false),
            phase,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Observe the run state machine, e.g. to draw a progress bar.
    pub fn subscribe(&self) -> watch::Receiver<RunPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub async fn run(&self, config: RunConfig) -> Result<RunResult, RunError> {
        self.run_with_progress(config, |_| {}).await
    }

    /// Runs every selected endpoint in registry order, calling `on_progress` after each sample.
    #[instrument(name = "run", skip_all, fields(iterations = config.iterations))]
    pub async fn run_with_progress(
        &self,
        config: RunConfig,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<RunResult, RunError> {
        let iterations = NonZeroU32::new(config.iterations).ok_or(RunError::ZeroIterations)?;
        let endpoints = config.resolve(&self.registry);
        if endpoints.is_empty() {
            return Err(RunError::EmptySelection);
        }

        let _guard = RunGuard::acquire(&self.running, &self.phase)?;

        let total = endpoints.len() as u64 * iterations.get() as u64;
        let mut done = 0;
        self.phase.send_replace(RunPhase::Running(Progress { done, total }));
        info!(
            "Starting run: {} endpoints x {iterations} iterations",
            endpoints.len()
        );

        let start = Instant::now();
        let collector = Collector::new(&self.fetcher, config.timeout);
        let mut results = Vec::with_capacity(endpoints.len());

        for endpoint in endpoints {
            debug!("Sampling {endpoint}");
            let samples = collector
                .collect(endpoint, iterations, |_| {
                    done += 1;
                    let progress = Progress { done, total };
                    self.phase.send_replace(RunPhase::Running(progress));
                    on_progress(progress);
                })
                .await;

            let result = EndpointResult::new(endpoint.clone(), samples)?;
            debug!("{result}");
            results.push(result);
        }

        let elapsed = start.elapsed();
        self.phase.send_replace(RunPhase::Completed {
            endpoints: results.len(),
            elapsed,
        });
        info!(
            "Run complete: {} requests in {}",
            total,
            humantime::format_duration(elapsed)
        );

        Ok(RunResult {
            config,
            results,
            elapsed,
        })
    }
}

/// Marks the orchestrator busy for the lifetime of a run. A run abandoned midway (its future
/// dropped) returns the phase to `Idle`.
struct RunGuard<'a> {
    running: &'a AtomicBool,
    phase: &'a watch::Sender<RunPhase>,
}

impl<'a> RunGuard<'a> {
    fn acquire(
        running: &'a AtomicBool,
        phase: &'a watch::Sender<RunPhase>,
    ) -> Result<Self, RunError> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!("Rejecting run: another run is in progress.");
                RunError::AlreadyRunning
            })?;
        Ok(Self { running, phase })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.phase.send_if_modified(|phase| {
            if matches!(phase, RunPhase::Running(_)) {
                *phase = RunPhase::Idle;
                true
            } else {
                false
            }
        });
        self.running.store(false, Ordering::Release);
    }
}
