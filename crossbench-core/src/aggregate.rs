use crate::stats::div_round;
use crate::EndpointResult;
#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ServiceAverage {
    pub service: String,
    /// Mean of the endpoints' `avg_ms`, not of their raw samples.
    pub avg_ms: u64,
    pub endpoints: usize,
}

/// Service-level view over one run's endpoint results.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Comparison {
    /// In order of each service's first appearance in the results.
    pub services: Vec<ServiceAverage>,
    pub fastest: Option<String>,
    pub slowest: Option<String>,
    /// `slowest / fastest`. Absent with fewer than two services, when they tie, or when the
    /// fastest average rounds to zero.
    pub speed_ratio: Option<f64>,
}

impl Comparison {
    pub fn avg_ms(&self, service: &str) -> Option<u64> {
        self.services
            .iter()
            .find(|s| s.service == service)
            .map(|s| s.avg_ms)
    }
}

/// Groups results by service. On equal averages the service appearing last wins both the
/// fastest and the slowest slot.
pub fn aggregate(results: &[EndpointResult]) -> Comparison {
    let mut totals: Vec<(&str, u64, usize)> = vec![];
    for result in results {
        match totals.iter_mut().find(|(name, _, _)| *name == result.service()) {
            Some((_, sum, count)) => {
                *sum += result.summary.avg_ms;
                *count += 1;
            }
            None => totals.push((result.service(), result.summary.avg_ms, 1)),
        }
    }

    let services: Vec<ServiceAverage> = totals
        .into_iter()
        .map(|(service, sum, count)| ServiceAverage {
            service: service.to_string(),
            avg_ms: div_round(sum, count as u64),
            endpoints: count,
        })
        .collect();

    let fastest = services.iter().rev().min_by_key(|s| s.avg_ms);
    let slowest = services.iter().max_by_key(|s| s.avg_ms);

    let speed_ratio = match (fastest, slowest) {
        (Some(fast), Some(slow))
            if services.len() > 1 && fast.avg_ms != slow.avg_ms && fast.avg_ms > 0 =>
        {
            Some(slow.avg_ms as f64 / fast.avg_ms as f64)
        }
        _ => None,
    };

    Comparison {
        fastest: fastest.map(|s| s.service.clone()),
        slowest: slowest.map(|s| s.service.clone()),
        speed_ratio,
        services,
    }
}
