use anyhow::Context;
use clap::Parser;
use crossbench::cli::{Cli, Format};
use crossbench::{report, HttpFetcher, Orchestrator};
use std::io::Write;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&cli.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let registry = cli.registry()?;
    if cli.list {
        print!("{}", report::render_registry(&registry));
        return Ok(());
    }

    let config = cli.run_config(&registry)?;
    info!("Benchmarking {config}");
    let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
    let orchestrator = Orchestrator::new(registry, fetcher);

    let quiet = cli.quiet;
    let run = orchestrator
        .run_with_progress(config, |progress| {
            if !quiet {
                eprint!("\rRunning {:>3}%", progress.percent());
                let _ = std::io::stderr().flush();
            }
        })
        .await?;
    if !quiet {
        eprintln!();
    }

    match cli.format {
        Format::Text => print!("{}", report::render_text(&run)),
        Format::Json => println!("{}", report::render_json(&run)?),
    }

    Ok(())
}
