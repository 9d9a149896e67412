//! Power monitoring against real loopback sockets.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use samsung_tv_client::{PowerMonitor, TcpProbe};
use tokio::{net::TcpListener, time};

async fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_check_once_is_true_for_listening_port() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let monitor = PowerMonitor::new(TcpProbe, "127.0.0.1", port);

    // Act
    let started = Instant::now();
    let online = monitor.check_once(Duration::from_secs(2)).await;

    // Assert
    assert!(online);
    assert!(started.elapsed() < Duration::from_secs(1), "answered promptly");
}

#[tokio::test]
async fn test_check_once_is_false_for_closed_port_within_timeout() {
    let port = free_port().await;
    let monitor = PowerMonitor::new(TcpProbe, "127.0.0.1", port);
    let timeout = Duration::from_millis(400);

    let started = Instant::now();
    let online = monitor.check_once(timeout).await;

    assert!(!online);
    assert!(started.elapsed() <= timeout + Duration::from_millis(250));
}

#[tokio::test]
async fn test_watch_reports_tv_turning_on_then_off() {
    // Arrange – nothing listens yet.
    let port = free_port().await;
    let monitor = PowerMonitor::new(TcpProbe, "127.0.0.1", port);
    let mut watch = monitor.watch(Duration::from_millis(50));

    // Act / Assert – off, then on once the listener appears.
    assert!(!watch.next().await);

    let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
    let became_online = time::timeout(Duration::from_secs(2), watch.next()).await;
    assert_eq!(became_online, Ok(true));

    drop(listener);
    let became_offline = time::timeout(Duration::from_secs(2), watch.next()).await;
    assert_eq!(became_offline, Ok(false));
}

#[tokio::test]
async fn test_spawn_watch_stops_after_running_is_cleared() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let running = Arc::new(AtomicBool::new(true));
    let monitor = PowerMonitor::new(TcpProbe, "127.0.0.1", port);

    let mut rx = monitor.spawn_watch(Duration::from_millis(20), Arc::clone(&running));
    assert_eq!(rx.recv().await, Some(true));

    running.store(false, Ordering::Relaxed);
    drop(listener);

    // No new transition is delivered once stopped; the channel closes.
    let next = time::timeout(Duration::from_secs(2), rx.recv()).await;
    assert_eq!(next, Ok(None));
}
