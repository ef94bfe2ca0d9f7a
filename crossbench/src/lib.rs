#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod cli;
mod collector;
mod fetch;
mod orchestrator;
pub mod report;

pub use collector::Collector;
pub use fetch::{Fetch, FetchError, FetchResponse, HttpFetcher, LocalFetch};
pub use orchestrator::{Orchestrator, Progress, RunError, RunPhase};

pub mod prelude {
    pub use crate::fetch::{Fetch, HttpFetcher};
    pub use crate::orchestrator::{Orchestrator, Progress, RunError, RunPhase};
    pub use crossbench_core::catalog::{default_groups, ServiceUrls};
    pub use crossbench_core::{
        Comparison, EndpointDescriptor, EndpointResult, EndpointSpec, Registry, RunConfig,
        RunResult, Sample, ServiceGroup, Summary,
    };
}
