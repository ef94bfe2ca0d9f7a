use crate::fetch::{Fetch, FetchError, FetchResponse};
use crossbench_core::{EndpointDescriptor, Sample};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

/// Takes timed samples of a single endpoint, one request at a time.
pub struct Collector<'a, F> {
    fetcher: &'a F,
    timeout: Option<Duration>,
}

impl<'a, F: Fetch> Collector<'a, F> {
    pub fn new(fetcher: &'a F, timeout: Option<Duration>) -> Self {
        #[cfg(feature = "metrics")]
        describe_metrics();

        Self { fetcher, timeout }
    }

    /// Issues exactly `iterations` requests, strictly in sequence, and returns one sample per
    /// request in issue order.
    ///
    /// A request that fails or times out is recorded as a failed sample carrying the time spent
    /// waiting for it. It is never retried. `on_sample` runs after each sample is recorded.
    pub async fn collect(
        &self,
        endpoint: &EndpointDescriptor,
        iterations: NonZeroU32,
        mut on_sample: impl FnMut(&Sample),
    ) -> Vec<Sample> {
        let url = endpoint.url();
        let mut samples = Vec::with_capacity(iterations.get() as usize);

        for i in 0..iterations.get() {
            let start = Instant::now();
            let res = self.send(&url).await;
            let sample = Sample::new(start.elapsed(), res.is_ok());

            match res {
                Ok(response) => trace!(
                    "{} #{i}: {}ms (status {}{})",
                    endpoint.id,
                    sample.duration_ms,
                    response.status,
                    if response.is_success() { "" } else { ", non-2xx" }
                ),
                Err(err) => warn!(
                    "{} #{i} failed after {}ms: {err}",
                    endpoint.id, sample.duration_ms
                ),
            }

            #[cfg(feature = "metrics")]
            record_metrics(endpoint, &sample);

            on_sample(&sample);
            samples.push(sample);
        }

        samples
    }

    async fn send(&self, url: &str) -> Result<FetchResponse, FetchError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetcher.get(url))
                .await
                .unwrap_or(Err(FetchError::Timeout(limit))),
            None => self.fetcher.get(url).await,
        }
    }
}

#[cfg(feature = "metrics")]
fn describe_metrics() {
    metrics::describe_histogram!(
        "crossbench_latency",
        metrics::Unit::Milliseconds,
        "Round-trip time of a benchmark request"
    );
}

#[cfg(feature = "metrics")]
fn record_metrics(endpoint: &EndpointDescriptor, sample: &Sample) {
    metrics::histogram!("crossbench_latency", "endpoint" => endpoint.id.clone())
        .record(sample.duration_ms as f64);

    if sample.succeeded {
        metrics::counter!("crossbench_success", "endpoint" => endpoint.id.clone()).increment(1);
    } else {
        metrics::counter!("crossbench_error", "endpoint" => endpoint.id.clone()).increment(1);
    }
}
