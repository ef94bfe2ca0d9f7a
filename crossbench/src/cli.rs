//! Command line configuration for the `crossbench` binary.
use clap::{Parser, ValueEnum};
use crossbench_core::catalog::{default_groups, ServiceUrls};
use crossbench_core::{
    Registry, RegistryError, RunConfig, DEFAULT_ITERATIONS, DEFAULT_REQUEST_TIMEOUT,
    MAX_SUGGESTED_ITERATIONS,
};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown endpoint `{0}` (see --list)")]
    UnknownEndpoint(String),

    #[error("Unknown service `{0}`")]
    UnknownService(String),

    #[error("No service has a base URL configured; set FLASK_API_URL, GO_API_URL or EXPRESS_API_URL")]
    NoEndpoints,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Compare the latency of GET endpoints across independently deployed services.
///
/// Requests are issued strictly one at a time so that measurements never compete with each
/// other for the local network.
#[derive(Parser, Debug)]
#[command(name = "crossbench", version)]
pub struct Cli {
    /// Base URL of the Flask API service
    #[arg(long, env = "FLASK_API_URL")]
    pub flask_url: Option<String>,

    /// Base URL of the Go API service
    #[arg(long, env = "GO_API_URL")]
    pub go_url: Option<String>,

    /// Base URL of the Express API service
    #[arg(long, env = "EXPRESS_API_URL")]
    pub express_url: Option<String>,

    /// Requests per endpoint
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_ITERATIONS,
        value_parser = clap::value_parser!(u32).range(1..=(MAX_SUGGESTED_ITERATIONS as i64)),
    )]
    pub iterations: u32,

    /// Benchmark this endpoint id (repeatable). Defaults to every endpoint.
    #[arg(short, long = "endpoint", value_name = "ID")]
    pub endpoints: Vec<String>,

    /// Benchmark every endpoint of this service, by name or tech (repeatable)
    #[arg(short, long = "service", value_name = "NAME")]
    pub services: Vec<String>,

    /// Give up on a single request after this long, e.g. `5s` or `250ms` [default: 30s]
    #[arg(long, value_parser = humantime::parse_duration, conflicts_with = "no_timeout")]
    pub timeout: Option<Duration>,

    /// Wait for every request however long it takes
    #[arg(long)]
    pub no_timeout: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Print the benchmarkable endpoints and exit
    #[arg(long)]
    pub list: bool,

    /// Do not draw progress on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter directives
    #[arg(long, env = "RUST_LOG", default_value = "crossbench=info")]
    pub log_filter: String,
}

impl Cli {
    pub fn service_urls(&self) -> ServiceUrls {
        ServiceUrls {
            flask: self.flask_url.clone(),
            go: self.go_url.clone(),
            express: self.express_url.clone(),
        }
    }

    pub fn registry(&self) -> Result<Registry, CliError> {
        Ok(Registry::new(default_groups(&self.service_urls()))?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.no_timeout {
            None
        } else {
            Some(self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
        }
    }

    /// Turns the selection flags into a run configuration. Unlike the engine, which ignores
    /// unknown ids, the command line rejects them: they are almost always typos.
    pub fn run_config(&self, registry: &Registry) -> Result<RunConfig, CliError> {
        if registry.is_empty() {
            return Err(CliError::NoEndpoints);
        }

        let mut config = RunConfig::new(self.iterations).timeout(self.request_timeout());

        for id in &self.endpoints {
            if registry.get(id).is_none() {
                return Err(CliError::UnknownEndpoint(id.clone()));
            }
            config = config.select(id);
        }

        for service in &self.services {
            let name = resolve_service(registry, service)
                .ok_or_else(|| CliError::UnknownService(service.clone()))?;
            config = config.select_service(registry, name);
        }

        if self.endpoints.is_empty() && self.services.is_empty() {
            config = config.select_all(registry);
        }

        Ok(config)
    }
}

fn resolve_service<'a>(registry: &'a Registry, arg: &str) -> Option<&'a str> {
    registry
        .list()
        .find(|e| {
            e.service_name.eq_ignore_ascii_case(arg) || e.service_tech.eq_ignore_ascii_case(arg)
        })
        .map(|e| e.service_name.as_str())
}
