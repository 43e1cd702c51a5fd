// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::session::{run_session, SessionOptions, SessionReport};
use crate::transport::{HostBoard, StreamSerial, Traced, TransportError};
use anyhow::{Context, Result};
use std::io;
use std::net::TcpListener;
use tracing::{info, warn};
use uart_echo_config::{parse_bind_addr, EchoConfig, TransportConfig};

fn session_options(config: &EchoConfig) -> SessionOptions<'_> {
    SessionOptions {
        banner: config.banner_bytes(),
        max_bytes: config.limits.max_bytes,
    }
}

/// Run whichever transport `config` selects, handing each finished session
/// to `on_session`.
pub fn serve(config: &EchoConfig, on_session: impl FnMut(SessionReport)) -> Result<()> {
    match &config.transport {
        TransportConfig::Stdio {} => serve_stdio(config, on_session),
        TransportConfig::Tcp { bind } => {
            let addr = parse_bind_addr(bind)?;
            let listener =
                TcpListener::bind(addr).with_context(|| format!("Failed to bind {}", addr))?;
            serve_tcp(listener, config, on_session)
        }
    }
}

/// Echo stdin to stdout for a single session.
pub fn serve_stdio(config: &EchoConfig, mut on_session: impl FnMut(SessionReport)) -> Result<()> {
    let serial = StreamSerial::new(io::stdin().lock(), io::stdout().lock());
    let board = HostBoard::new("stdio", Traced::new(serial));
    let report = run_session(board, session_options(config)).context("stdio session failed")?;
    on_session(report);
    Ok(())
}

/// Sort an `accept()` result into a connection, a transient failure worth
/// retrying (`None`), or a listener failure that ends the server.
fn retry_transient<T>(accepted: io::Result<T>) -> Result<Option<T>> {
    match accepted {
        Ok(conn) => Ok(Some(conn)),
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::Interrupted
            ) =>
        {
            warn!(error = %e, "accept failed, retrying");
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to accept TCP connection"),
    }
}

/// Accept connections one at a time and echo each until the peer hangs up.
///
/// Runs forever unless `limits.max_connections` is set. A connection that
/// fails mid-session is logged and the listener keeps serving; a listener
/// that stops accepting (e.g. out of file descriptors) is an error.
pub fn serve_tcp(
    listener: TcpListener,
    config: &EchoConfig,
    mut on_session: impl FnMut(SessionReport),
) -> Result<()> {
    let local = listener
        .local_addr()
        .context("Failed to query listener address")?;
    info!(name = %config.name, addr = %local, "listening");

    let limit = config.limits.max_connections.unwrap_or(u64::MAX);
    let mut served = 0u64;
    while served < limit {
        let Some((stream, peer)) = retry_transient(listener.accept())? else {
            continue;
        };
        served += 1;

        if let Err(e) = stream.set_nodelay(true) {
            warn!(peer = %peer, error = %e, "failed to disable Nagle");
        }
        let reader = match stream.try_clone() {
            Ok(reader) => reader,
            Err(e) => {
                warn!(peer = %peer, error = %e, "failed to split connection");
                continue;
            }
        };

        let serial = Traced::new(StreamSerial::new(reader, stream));
        let board = HostBoard::new(peer.to_string(), serial);
        match run_session(board, session_options(config)) {
            Ok(report) => on_session(report),
            Err(TransportError::Io(e)) => warn!(peer = %peer, error = %e, "session aborted"),
            Err(TransportError::Closed) => {}
        }
    }

    info!(connections = served, "connection limit reached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aborted_handshake_is_retried() {
        for kind in [
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::Interrupted,
        ] {
            let outcome = retry_transient::<()>(Err(io::Error::from(kind)));
            assert!(matches!(outcome, Ok(None)), "{:?} should be retried", kind);
        }
    }

    #[test]
    fn test_persistent_accept_failure_stops_server() {
        // EMFILE surfaces as an uncategorized OS error.
        let emfile = io::Error::from_raw_os_error(24);
        let err = retry_transient::<()>(Err(emfile)).unwrap_err();
        assert!(err.to_string().contains("Failed to accept TCP connection"));

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(retry_transient::<()>(Err(denied)).is_err());
    }

    #[test]
    fn test_accepted_connection_passes_through() {
        assert_eq!(retry_transient(Ok(7u8)).unwrap(), Some(7));
    }
}
