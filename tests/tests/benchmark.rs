mod utils;
use utils::*;

use crossbench::prelude::*;
use std::time::Duration;

#[tokio::test]
#[ntest::timeout(30_000)]
async fn compares_two_live_services() {
    init();
    let (fast_addr, fast_hits) = mock_service::spawn("fast").await.unwrap();
    let (slow_addr, slow_hits) = mock_service::spawn("slow").await.unwrap();

    let orchestrator = orchestrator(vec![
        group(
            "fast",
            fast_addr,
            &[("fast-5", "/delay/ms/5"), ("fast-10", "/delay/ms/10")],
        ),
        group("slow", slow_addr, &[("slow-80", "/delay/ms/80")]),
    ]);
    let config = RunConfig::new(3).select_all(orchestrator.registry());

    let run = orchestrator.run(config).await.unwrap();

    let ids: Vec<_> = run.results.iter().map(|r| r.endpoint.id.as_str()).collect();
    assert_eq!(ids, vec!["fast-5", "fast-10", "slow-80"]);
    for result in &run.results {
        assert_eq!(result.samples.len(), 3);
        assert_eq!(result.summary.success_rate_percent, 100);
        let s = result.summary;
        assert!(s.min_ms <= s.p50_ms && s.p50_ms <= s.p95_ms && s.p95_ms <= s.max_ms);
    }
    assert!(run.results[2].summary.min_ms >= 80);

    // Exactly one request per sample reached each service.
    assert_eq!(fast_hits.get(), 6);
    assert_eq!(slow_hits.get(), 3);

    let comparison = run.comparison();
    assert_eq!(comparison.fastest.as_deref(), Some("fast"));
    assert_eq!(comparison.slowest.as_deref(), Some("slow"));
    assert!(dbg!(comparison.speed_ratio).unwrap() > 1.);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn error_statuses_are_successful_samples() {
    init();
    let (addr, hits) = mock_service::spawn("errors").await.unwrap();

    let orchestrator = orchestrator(vec![group(
        "errors",
        addr,
        &[("unavailable", "/status/503"), ("missing", "/status/404")],
    )]);
    let config = RunConfig::new(4).select_all(orchestrator.registry());

    let run = orchestrator.run(config).await.unwrap();

    assert_eq!(hits.get(), 8);
    assert_eq!(run.fully_successful_endpoints(), 2);
    assert_eq!(run.comparison().speed_ratio, None);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn refused_connections_are_failed_samples() {
    init();
    let (addr, _) = mock_service::spawn("up").await.unwrap();
    // Grab a free port and release it again so nothing is listening there.
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let orchestrator = orchestrator(vec![
        group("up", addr, &[("up-health", "/health")]),
        group("down", closed, &[("down-health", "/health")]),
    ]);
    let config = RunConfig::new(4).select_all(orchestrator.registry());

    let run = orchestrator.run(config).await.unwrap();

    assert_eq!(run.results.len(), 2);
    let down = &run.results[1];
    assert_eq!(down.samples.len(), 4);
    assert!(down.samples.iter().all(|s| !s.succeeded));
    assert_eq!(down.summary.success_rate_percent, 0);
    assert_eq!(run.results[0].summary.success_rate_percent, 100);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn slow_requests_time_out() {
    init();
    let (addr, hits) = mock_service::spawn("stuck").await.unwrap();

    let orchestrator = orchestrator(vec![group("stuck", addr, &[("stuck", "/delay/ms/5000")])]);
    let config = RunConfig::new(2)
        .select("stuck")
        .timeout(Some(Duration::from_millis(100)));

    let run = orchestrator.run(config).await.unwrap();

    let stuck = &run.results[0];
    assert_eq!(hits.get(), 2);
    assert!(stuck.samples.iter().all(|s| !s.succeeded));
    assert!(stuck.samples.iter().all(|s| s.duration_ms >= 100 && s.duration_ms < 5_000));
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn progress_tracks_every_request() {
    init();
    let (addr, _) = mock_service::spawn("progress").await.unwrap();

    let orchestrator = orchestrator(vec![group(
        "progress",
        addr,
        &[("root", ""), ("health", "/health"), ("delay", "/delay/ms/1")],
    )]);
    let config = RunConfig::new(5).select_all(orchestrator.registry());

    let mut reports = vec![];
    let run = orchestrator
        .run_with_progress(config, |p| reports.push(p))
        .await
        .unwrap();

    assert_eq!(reports.len(), run.total_requests());
    assert!(reports.windows(2).all(|w| w[0].percent() <= w[1].percent()));
    assert_eq!(reports.last().map(Progress::percent), Some(100));
    assert!(matches!(orchestrator.phase(), RunPhase::Completed { endpoints: 3, .. }));
}
