use std::net::SocketAddr;
use tracing_subscriber::FmtSubscriber;

/// Three local stand-ins on the ports the dashboard services use by default.
const SERVICES: [(&str, u16); 3] = [("flask-api", 5000), ("go-api", 8080), ("express-api", 3001)];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("mock_service=debug,tower_http=debug")
        .init();

    let mut tasks = tokio::task::JoinSet::new();
    for (name, port) in SERVICES {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tasks.spawn(async move { mock_service::run(name, addr).await });
    }

    while let Some(res) = tasks.join_next().await {
        res??;
    }
    Ok(())
}
