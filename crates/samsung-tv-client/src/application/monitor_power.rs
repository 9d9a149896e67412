//! PowerMonitor: detects when a television turns on or off.
//!
//! A Samsung TV only accepts connections on its remote-control port while it
//! is powered on, so "can I open a TCP connection?" doubles as a power sensor.
//!
//! # Polling rhythm
//!
//! ```text
//!   probe(timeout = interval)
//!     ├─ success ─▶ sleep(interval) ─▶ probe ...
//!     └─ failure ──────────────────▶ probe ...   (the connect timeout paces the loop)
//! ```
//!
//! [`PowerWatch`] turns the raw samples into an edge-triggered stream: a value
//! is produced only when it differs from the previous one, and the first
//! observation is always produced.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::{sync::mpsc, time};
use tracing::{debug, info};

/// Answers "is anything accepting connections at `host:port` right now?".
///
/// The infrastructure implementation opens a TCP connection; test
/// implementations replay a scripted sequence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns `true` if a connection could be opened within `timeout`.
    ///
    /// Must never take (much) longer than `timeout` and must not leave a
    /// connection open.
    async fn is_reachable(&self, host: &str, port: u16, timeout: Duration) -> bool;
}

/// Lets one probe be shared between several monitors.
#[async_trait]
impl<P: ReachabilityProbe + ?Sized> ReachabilityProbe for Arc<P> {
    async fn is_reachable(&self, host: &str, port: u16, timeout: Duration) -> bool {
        (**self).is_reachable(host, port, timeout).await
    }
}

/// Watches one television's power state through a [`ReachabilityProbe`].
#[derive(Debug, Clone)]
pub struct PowerMonitor<P> {
    probe: P,
    host: String,
    port: u16,
}

impl<P: ReachabilityProbe> PowerMonitor<P> {
    /// Creates a monitor for `host:port`.
    pub fn new(probe: P, host: impl Into<String>, port: u16) -> Self {
        Self {
            probe,
            host: host.into(),
            port,
        }
    }

    /// The monitored host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Probes once.  Any failure (refused, unresolvable, timed out) is `false`.
    pub async fn check_once(&self, timeout: Duration) -> bool {
        let online = self.probe.is_reachable(&self.host, self.port, timeout).await;
        debug!("{}:{} reachable: {online}", self.host, self.port);
        online
    }

    /// Starts a fresh edge-triggered sequence of power states.
    ///
    /// `interval` is both the timeout of every probe and the pause after a
    /// successful one.  The sequence is infinite; stop by dropping it.
    pub fn watch(&self, interval: Duration) -> PowerWatch<'_, P> {
        PowerWatch {
            monitor: self,
            interval,
            last: None,
            pause_before_probe: false,
        }
    }

    /// Calls `on_change` with every power transition, forever.
    ///
    /// The returned future only completes if it is dropped (e.g. by a
    /// `tokio::select!` on a shutdown signal).
    pub async fn on_power_change<F>(&self, interval: Duration, mut on_change: F)
    where
        F: FnMut(bool) + Send,
    {
        let mut watch = self.watch(interval);
        loop {
            let online = watch.next().await;
            on_change(online);
        }
    }
}

impl<P: ReachabilityProbe + 'static> PowerMonitor<P> {
    /// Runs the watch loop on its own tokio task.
    ///
    /// Transitions are delivered on the returned channel.  `running` is
    /// checked before every probe, so the task ends within one probe and
    /// pause of the flag being cleared, whether or not the state changes.
    /// Dropping the receiver also ends it.
    pub fn spawn_watch(self, interval: Duration, running: Arc<AtomicBool>) -> mpsc::Receiver<bool> {
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            let mut watch = self.watch(interval);
            while running.load(Ordering::Relaxed) {
                let changed = tokio::select! {
                    changed = watch.step() => changed,
                    _ = tx.closed() => break,
                };
                let Some(online) = changed else { continue };
                if !running.load(Ordering::Relaxed) || tx.send(online).await.is_err() {
                    break;
                }
            }
            debug!("power watch for {} stopped", self.host);
        });

        rx
    }
}

/// Lazy, infinite sequence of power-state transitions.
///
/// Created by [`PowerMonitor::watch`]; every call to [`next`](Self::next)
/// keeps probing until the state differs from the last value it returned.
#[derive(Debug)]
pub struct PowerWatch<'a, P> {
    monitor: &'a PowerMonitor<P>,
    interval: Duration,
    last: Option<bool>,
    pause_before_probe: bool,
}

impl<P: ReachabilityProbe> PowerWatch<'_, P> {
    /// Waits for the next transition and returns the new state
    /// (`true` = online).
    pub async fn next(&mut self) -> bool {
        loop {
            if let Some(online) = self.step().await {
                return online;
            }
        }
    }

    /// One probe, preceded by the pause owed to a previous success.
    /// Returns the new state if it differs from the last one reported.
    async fn step(&mut self) -> Option<bool> {
        if self.pause_before_probe {
            time::sleep(self.interval).await;
        }
        let online = self.monitor.check_once(self.interval).await;
        self.pause_before_probe = online;

        if self.last == Some(online) {
            return None;
        }
        self.last = Some(online);
        info!(
            "TV {} is {}",
            self.monitor.host,
            if online { "online" } else { "offline" }
        );
        Some(online)
    }

    /// The last state returned by [`next`](Self::next), if any.
    pub fn last(&self) -> Option<bool> {
        self.last
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
