use crossbench::prelude::*;
use std::net::SocketAddr;
use std::sync::OnceLock;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::new("crossbench=debug,mock_service=debug"))
            .with_test_writer()
            .try_init();
    });
}

#[allow(unused)]
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

/// A service group whose endpoints are `(id, path)` pairs on the given mock instance.
#[allow(unused)]
pub fn group(name: &str, addr: SocketAddr, endpoints: &[(&str, &str)]) -> ServiceGroup {
    endpoints
        .iter()
        .fold(ServiceGroup::new(name, &base_url(addr)), |group, (id, path)| {
            group.endpoint(EndpointSpec::get(id, path, id, ""))
        })
}

#[allow(unused)]
pub fn orchestrator(groups: Vec<ServiceGroup>) -> Orchestrator<HttpFetcher> {
    let registry = Registry::new(groups).expect("valid registry");
    Orchestrator::new(registry, HttpFetcher::new().expect("http client"))
}
