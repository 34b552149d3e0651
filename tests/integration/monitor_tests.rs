use crate::support::{fast_checker, CapturedLogs, RecordingNotifier, TestClock, SLOW_RESPONSE};
use reqwest::Client;
use site_pulse::checker::{FailureKind, Outcome};
use site_pulse::report::{Delivery, StatusLog};
use site_pulse::{Monitor, Reporter, Site, SiteListProvider};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves a site list with one fast site (`/a`, 200) and one hanging site (`/b`)
async fn start_two_site_server() -> MockServer {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sites.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{0}/a\n{0}/b\n", base)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_delay(SLOW_RESPONSE))
        .mount(&mock_server)
        .await;

    mock_server
}

fn build_monitor(
    list_url: Option<String>,
    log_path: &Path,
    notifier: Option<Arc<RecordingNotifier>>,
    clock: Arc<TestClock>,
) -> Monitor {
    let provider = SiteListProvider::with_client(Client::new(), list_url);
    let reporter = Reporter::new(
        StatusLog::new(log_path),
        notifier.map(|n| Box::new(n) as Box<dyn site_pulse::Notifier>),
        "Website Status Report",
    );

    Monitor::new(provider, fast_checker(), reporter)
        .with_clock(clock)
        .with_interval(Duration::from_secs(300))
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_cycle_with_one_up_and_one_timed_out_site() {
    let mock_server = start_two_site_server().await;
    let base = mock_server.uri();
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("site_status.log");
    let notifier = Arc::new(RecordingNotifier::default());

    let monitor = build_monitor(
        Some(format!("{}/sites.txt", base)),
        &log_path,
        Some(notifier.clone()),
        Arc::new(TestClock::instant()),
    );

    let summary = monitor.run_cycle().await;

    // Status result: one entry per site, in list order
    let site_a = Site::new(format!("{}/a", base));
    let site_b = Site::new(format!("{}/b", base));
    assert_eq!(summary.sites_listed, 2);
    assert_eq!(summary.result.len(), 2);
    assert_eq!(summary.result.get(&site_a), Some(&Outcome::Status(200)));
    let outcome_b = summary.result.get(&site_b).expect("/b should be in the result");
    match outcome_b {
        Outcome::Failure(failure) => assert_eq!(failure.kind, FailureKind::Timeout),
        other => panic!("expected timeout for /b, got {:?}", other),
    }
    let timeout_text = outcome_b.to_string();

    // Log: two timestamped lines
    let lines = read_lines(&log_path);
    assert_eq!(
        lines,
        vec![
            format!("2024-03-15 08:30:00 - {}: 200", site_a),
            format!("2024-03-15 08:30:00 - {}: {}", site_b, timeout_text),
        ]
    );

    // Notification: both lines in the body
    let report = notifier.last().expect("a report should have been sent");
    assert_eq!(report.subject, "Website Status Report");
    assert_eq!(
        report.body,
        format!("{}: 200\n{}: {}", site_a, site_b, timeout_text)
    );

    let outcome = summary.report.expect("cycle should have reported");
    assert_eq!(outcome.persisted.unwrap(), 2);
    assert_eq!(outcome.delivery, Delivery::Sent);
}

#[tokio::test]
async fn test_unset_site_list_skips_the_cycle() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("site_status.log");
    let notifier = Arc::new(RecordingNotifier::default());

    let monitor = build_monitor(
        None,
        &log_path,
        Some(notifier.clone()),
        Arc::new(TestClock::instant()),
    );

    let summary = monitor.run_cycle().await;

    assert!(summary.was_skipped());
    assert!(summary.result.is_empty());
    assert!(!log_path.exists());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_missing_mail_settings_still_write_the_log() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sites.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{}/up\n", base)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("site_status.log");

    let monitor = build_monitor(
        Some(format!("{}/sites.txt", base)),
        &log_path,
        None,
        Arc::new(TestClock::instant()),
    );

    let summary = monitor.run_cycle().await;

    let outcome = summary.report.expect("cycle should have reported");
    assert_eq!(outcome.delivery, Delivery::Skipped);
    assert_eq!(
        read_lines(&log_path),
        vec![format!("2024-03-15 08:30:00 - {}/up: 204", base)]
    );
}

#[tokio::test]
async fn test_repeated_cycles_append_one_line_per_site() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sites.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!("{0}/one\n{0}/two\n", base)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("site_status.log");
    std::fs::write(&log_path, "earlier run\n").unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(TestClock::instant());

    let monitor = build_monitor(
        Some(format!("{}/sites.txt", base)),
        &log_path,
        Some(notifier.clone()),
        clock.clone(),
    );

    let (_stop_tx, stop_rx) = watch::channel(false);
    let cycles = monitor.run(stop_rx, Some(3)).await;

    assert_eq!(cycles, 3);
    let lines = read_lines(&log_path);
    assert_eq!(lines.len(), 1 + 3 * 2);
    assert_eq!(lines[0], "earlier run");
    assert_eq!(notifier.count(), 3);

    // No pause after the final cycle.
    assert_eq!(
        *clock.sleeps.lock().unwrap(),
        vec![Duration::from_secs(300); 2]
    );
}

#[tokio::test]
async fn test_stop_before_start_runs_nothing() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(TestClock::instant());
    let monitor = build_monitor(None, &dir.path().join("log"), None, clock.clone());

    let (stop_tx, stop_rx) = watch::channel(false);
    stop_tx.send(true).unwrap();

    assert_eq!(monitor.run(stop_rx, None).await, 0);
    assert_eq!(clock.sleep_count(), 0);
}

#[tokio::test]
async fn test_stop_signal_interrupts_the_pause() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(TestClock::blocking());
    let monitor = build_monitor(None, &dir.path().join("log"), None, clock.clone());

    let (stop_tx, stop_rx) = watch::channel(false);

    let run = monitor.run(stop_rx, None);
    let stopper = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        stop_tx.send(true).unwrap();
    };

    let (cycles, ()) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(run, stopper)
    })
    .await
    .expect("monitor did not stop");

    assert_eq!(cycles, 1);
    assert_eq!(clock.sleep_count(), 1);
}

#[tokio::test]
async fn test_zero_cycle_limit_runs_nothing() {
    let mock_server = start_two_site_server().await;
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("site_status.log");
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(TestClock::instant());

    let monitor = build_monitor(
        Some(format!("{}/sites.txt", mock_server.uri())),
        &log_path,
        Some(notifier.clone()),
        clock.clone(),
    );

    let (_stop_tx, stop_rx) = watch::channel(false);

    assert_eq!(monitor.run(stop_rx, Some(0)).await, 0);
    assert_eq!(clock.sleep_count(), 0);
    assert!(!log_path.exists());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_unset_site_list_tells_the_operator() {
    let logs = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(logs.subscriber());

    let dir = TempDir::new().unwrap();
    let monitor = build_monitor(
        None,
        &dir.path().join("site_status.log"),
        None,
        Arc::new(TestClock::instant()),
    );

    let summary = monitor.run_cycle().await;

    assert!(summary.was_skipped());
    let output = logs.contents();
    assert!(output.contains("SITE_LIST_URL environment variable is not set."), "{}", output);
    assert!(output.contains("No sites to check."), "{}", output);
}
