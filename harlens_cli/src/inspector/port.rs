//! Port binding logic for the inspector

use anyhow::Result;
use tokio::net::TcpListener;

/// Maximum number of ports to try before giving up
const MAX_PORT_ATTEMPTS: u16 = 10;

/// Bind the inspector to the preferred port, or the next free one after it
pub async fn bind_inspector_port(preferred_port: u16) -> Result<TcpListener> {
    for offset in 0..MAX_PORT_ATTEMPTS {
        let Some(port) = preferred_port.checked_add(offset) else {
            break;
        };

        match TcpListener::bind(("127.0.0.1", port)).await {
            Ok(listener) => {
                if offset > 0 {
                    tracing::info!("Port {} in use, inspector bound to {}", preferred_port, port);
                }
                return Ok(listener);
            }
            Err(e) => {
                tracing::debug!("Port {} unavailable: {}", port, e);
            }
        }
    }

    anyhow::bail!(
        "No free port found in {}..{}",
        preferred_port,
        preferred_port.saturating_add(MAX_PORT_ATTEMPTS)
    )
}
