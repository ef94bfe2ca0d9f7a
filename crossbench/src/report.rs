//! Plain-text and JSON rendering of a finished run.
use crossbench_core::{Comparison, Registry, RunResult};
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: u64 = 20;

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub run: &'a RunResult,
    pub comparison: Comparison,
}

impl<'a> JsonReport<'a> {
    pub fn new(run: &'a RunResult) -> Self {
        Self {
            run,
            comparison: run.comparison(),
        }
    }
}

pub fn render_json(run: &RunResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(run))
}

pub fn render_text(run: &RunResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, run);
    out
}

fn write_text(out: &mut String, run: &RunResult) -> std::fmt::Result {
    writeln!(
        out,
        "{:<14} {:<24} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}  {:<8}  avg",
        "service", "path", "avg", "min", "p50", "p95", "max", "success", "tier"
    )?;
    let scale = run.max_latency_ms().unwrap_or_default();
    for r in &run.results {
        let s = &r.summary;
        let path = if r.endpoint.path.is_empty() {
            "/"
        } else {
            r.endpoint.path.as_str()
        };
        writeln!(
            out,
            "{:<14} {:<24} {:>5}ms {:>5}ms {:>5}ms {:>5}ms {:>5}ms {:>7}%  {:<8}  {}",
            r.endpoint.service_name,
            path,
            s.avg_ms,
            s.min_ms,
            s.p50_ms,
            s.p95_ms,
            s.max_ms,
            s.success_rate_percent,
            s.tier().to_string(),
            bar(s.avg_ms, scale)
        )?;
    }

    let comparison = run.comparison();
    writeln!(out)?;
    for service in &comparison.services {
        writeln!(
            out,
            "{:<14} avg {}ms over {} endpoints",
            service.service, service.avg_ms, service.endpoints
        )?;
    }

    match (&comparison.fastest, comparison.speed_ratio) {
        (Some(fastest), Some(ratio)) => writeln!(
            out,
            "{fastest} is fastest, {ratio:.1}x faster than {}",
            comparison.slowest.as_deref().unwrap_or_default()
        )?,
        (Some(fastest), None) => writeln!(out, "{fastest} is fastest")?,
        _ => {}
    }

    writeln!(
        out,
        "{} requests, {}/{} endpoints OK, {}",
        run.total_requests(),
        run.fully_successful_endpoints(),
        run.results.len(),
        humantime::format_duration(run.elapsed)
    )
}

/// Averages drawn against the slowest single request of the run.
fn bar(avg_ms: u64, scale: u64) -> String {
    if scale == 0 {
        return String::new();
    }
    "#".repeat((avg_ms.min(scale) * BAR_WIDTH).div_ceil(scale) as usize)
}

pub fn render_registry(registry: &Registry) -> String {
    let mut out = String::new();
    for endpoint in registry.list() {
        let _ = writeln!(
            out,
            "{:<24} {:<14} {}",
            endpoint.id,
            endpoint.service_name,
            endpoint.url()
        );
    }
    out
}
