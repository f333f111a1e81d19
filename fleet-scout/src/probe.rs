//! TCP probing for open inference ports.

use std::collections::BTreeSet;
use std::time::Duration;

use fleet_scout_common::ActiveHost;
use tokio::net::TcpStream;

use crate::config::ProbeConfig;
use crate::pool::run_bounded;

/// Return the addresses that accept a TCP connection on the configured port.
///
/// Timeouts, refusals and unreachable hosts are all treated the same: the
/// address is left out. No retries.
pub async fn probe<I>(addresses: I, config: &ProbeConfig) -> BTreeSet<ActiveHost>
where
    I: IntoIterator<Item = String>,
{
    let port = config.port;
    let timeout = config.timeout();

    let results = run_bounded(addresses, config.concurrency, move |address| async move {
        is_port_open(&address, port, timeout)
            .await
            .then(|| ActiveHost::new(address, port))
    })
    .await;

    let active: BTreeSet<ActiveHost> = results.into_iter().flatten().collect();
    tracing::info!("Found {} active hosts on port {}", active.len(), port);
    active
}

/// Connect and immediately close.
pub async fn is_port_open(address: &str, port: u16, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect((address, port))).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            tracing::debug!("Probe {}:{} failed: {}", address, port, e);
            false
        }
        Err(_) => {
            tracing::debug!("Probe {}:{} timed out", address, port);
            false
        }
    }
}
