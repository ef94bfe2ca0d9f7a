//! Static catalog of benchmarkable endpoints.
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate endpoint id `{0}`")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation as declared inside a [`ServiceGroup`].
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    pub id: String,
    pub method: HttpMethod,
    pub path: String,
    pub name: String,
    pub description: String,
}

impl EndpointSpec {
    pub fn get(id: &str, path: &str, name: &str, description: &str) -> Self {
        Self::new(id, HttpMethod::Get, path, name, description)
    }

    pub fn post(id: &str, path: &str, name: &str, description: &str) -> Self {
        Self::new(id, HttpMethod::Post, path, name, description)
    }

    fn new(id: &str, method: HttpMethod, path: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            method,
            path: path.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// A backend service and the operations it exposes.
#[derive(Debug, Clone)]
pub struct ServiceGroup {
    pub name: String,
    pub tech: String,
    pub runtime: String,
    /// Presentation tag only; the engine never interprets it.
    pub color: String,
    pub base_url: String,
    pub endpoints: Vec<EndpointSpec>,
}

impl ServiceGroup {
    pub fn new(name: &str, base_url: &str) -> Self {
        Self {
            name: name.to_string(),
            tech: String::new(),
            runtime: String::new(),
            color: String::new(),
            base_url: base_url.to_string(),
            endpoints: vec![],
        }
    }

    pub fn tech(mut self, tech: &str, runtime: &str) -> Self {
        self.tech = tech.to_string();
        self.runtime = runtime.to_string();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn endpoint(mut self, endpoint: EndpointSpec) -> Self {
        self.endpoints.push(endpoint);
        self
    }
}

/// A fully resolved endpoint: the operation plus the service it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EndpointDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub service_name: String,
    pub service_tech: String,
    pub service_color: String,
    pub method: HttpMethod,
    pub path: String,
    pub base_url: String,
}

impl EndpointDescriptor {
    /// Target of a benchmark request: `base_url + path`, no query string.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    pub fn is_benchmarkable(&self) -> bool {
        self.method == HttpMethod::Get && !self.base_url.is_empty()
    }
}

impl fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{} {} {}", self.service_name, self.method, path)
    }
}

/// Lookup table of endpoints, built once and never mutated.
///
/// Only `GET` operations are ever handed out for benchmarking: repeating a write operation
/// would change the state of the service under test.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    endpoints: Vec<EndpointDescriptor>,
}

impl Registry {
    /// Flattens the groups into descriptors, preserving declaration order.
    ///
    /// Endpoint ids must be unique across every group. Groups without a base URL are skipped,
    /// since there is nothing to send requests to.
    pub fn new(groups: impl IntoIterator<Item = ServiceGroup>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut endpoints = vec![];

        for group in groups {
            for spec in &group.endpoints {
                if !seen.insert(spec.id.clone()) {
                    return Err(RegistryError::DuplicateId(spec.id.clone()));
                }
            }

            let base_url = group.base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                warn!(
                    "Service {} has no base URL configured; its {} endpoints are unavailable.",
                    group.name,
                    group.endpoints.len()
                );
                continue;
            }

            for spec in group.endpoints {
                trace!("Registering {} {} {}", group.name, spec.method, spec.path);
                endpoints.push(EndpointDescriptor {
                    id: spec.id,
                    name: spec.name,
                    description: spec.description,
                    service_name: group.name.clone(),
                    service_tech: group.tech.clone(),
                    service_color: group.color.clone(),
                    method: spec.method,
                    path: spec.path,
                    base_url: base_url.to_string(),
                });
            }
        }

        debug!("Registry built with {} endpoints", endpoints.len());
        Ok(Self { endpoints })
    }

    /// Every benchmarkable (`GET`) endpoint in declaration order.
    pub fn list(&self) -> impl Iterator<Item = &EndpointDescriptor> + '_ {
        self.endpoints.iter().filter(|e| e.is_benchmarkable())
    }

    pub fn filter_by_service<'a>(
        &'a self,
        service: &'a str,
    ) -> impl Iterator<Item = &'a EndpointDescriptor> + 'a {
        self.list().filter(move |e| e.service_name == service)
    }

    pub fn get(&self, id: &str) -> Option<&EndpointDescriptor> {
        self.list().find(|e| e.id == id)
    }

    /// Distinct service names with at least one benchmarkable endpoint, in declaration order.
    pub fn services(&self) -> Vec<&str> {
        let mut services: Vec<&str> = vec![];
        for endpoint in self.list() {
            if !services.contains(&endpoint.service_name.as_str()) {
                services.push(&endpoint.service_name);
            }
        }
        services
    }

    pub fn len(&self) -> usize {
        self.list().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<ServiceGroup> {
        vec![
            ServiceGroup::new("X", "http://x.local/")
                .endpoint(EndpointSpec::get("x-root", "", "Root", ""))
                .endpoint(EndpointSpec::post("x-add", "/items", "Add", ""))
                .endpoint(EndpointSpec::get("x-items", "/items", "Items", "")),
            ServiceGroup::new("Y", "http://y.local")
                .endpoint(EndpointSpec::get("y-health", "/health", "Health", "")),
        ]
    }

    #[test]
    fn list_excludes_write_operations() {
        let registry = Registry::new(groups()).unwrap();
        let ids: Vec<_> = registry.list().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["x-root", "x-items", "y-health"]);
        assert!(registry.get("x-add").is_none());
    }

    #[test]
    fn filter_by_service_keeps_order() {
        let registry = Registry::new(groups()).unwrap();
        let ids: Vec<_> = registry
            .filter_by_service("X")
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["x-root", "x-items"]);
        assert_eq!(registry.filter_by_service("Z").count(), 0);
        assert_eq!(registry.services(), vec!["X", "Y"]);
    }

    #[test]
    fn url_joins_base_and_path() {
        let registry = Registry::new(groups()).unwrap();
        assert_eq!(registry.get("x-root").unwrap().url(), "http://x.local");
        assert_eq!(registry.get("x-items").unwrap().url(), "http://x.local/items");
        assert_eq!(
            registry.get("y-health").unwrap().url(),
            "http://y.local/health"
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut groups = groups();
        groups.push(
            ServiceGroup::new("Z", "http://z.local")
                .endpoint(EndpointSpec::get("x-root", "/", "Root", "")),
        );
        assert_eq!(
            Registry::new(groups).unwrap_err(),
            RegistryError::DuplicateId("x-root".to_string())
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn services_without_base_url_are_skipped() {
        let mut groups = groups();
        groups[1].base_url = "  ".to_string();
        let registry = Registry::new(groups).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.services(), vec!["X"]);
        assert!(logs_contain("no base URL configured"));
    }
}
