//! TCP connect probe used to decide whether a television is powered on.
//!
//! The remote-control port only accepts connections while the TV is on, so a
//! successful connect is the liveness signal.  Nothing is written; the
//! connection is closed straight away.

use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use crate::application::monitor_power::ReachabilityProbe;
use crate::infrastructure::network::TransportSession;

/// [`ReachabilityProbe`] that opens (and immediately closes) a TCP connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl ReachabilityProbe for TcpProbe {
    async fn is_reachable(&self, host: &str, port: u16, timeout: Duration) -> bool {
        match TransportSession::connect(host, port, timeout).await {
            Ok(session) => {
                session.close().await;
                true
            }
            Err(e) => {
                trace!("probe failed: {e}");
                false
            }
        }
    }
}
