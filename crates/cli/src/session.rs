// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::transport::{HostBoard, TransportError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uart_echo_core::{boot, EchoStats, Serial};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The peer closed its side of the stream.
    InputClosed,
    MaxBytes,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub peer: String,
    pub stop_reason: StopReason,
    pub stats: EchoStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions<'a> {
    pub banner: Option<&'a [u8]>,
    pub max_bytes: Option<u64>,
}

/// Boot `board` and echo until the stream closes or `max_bytes` is reached.
///
/// Only transport failures other than a closed stream are returned as errors.
pub fn run_session<S>(
    board: HostBoard<S>,
    options: SessionOptions<'_>,
) -> Result<SessionReport, TransportError>
where
    S: Serial<Error = TransportError>,
{
    let peer = board.label().to_string();
    let mut echo = boot(board);
    info!(peer = %peer, "session started");

    let stop_reason = 'session: {
        if let Some(banner) = options.banner {
            match echo.announce(banner) {
                Ok(()) => {}
                Err(TransportError::Closed) => break 'session StopReason::InputClosed,
                Err(e) => return Err(e),
            }
        }

        loop {
            if let Some(max) = options.max_bytes {
                if echo.stats().bytes_echoed >= max {
                    break 'session StopReason::MaxBytes;
                }
            }

            match echo.step() {
                Ok(_) => {}
                Err(TransportError::Closed) => break 'session StopReason::InputClosed,
                Err(e) => return Err(e),
            }
        }
    };

    let stats = echo.stats();
    debug!(peer = %peer, ?stats, "session counters");
    info!(
        peer = %peer,
        bytes = stats.bytes_echoed,
        reason = ?stop_reason,
        "session finished"
    );

    Ok(SessionReport {
        peer,
        stop_reason,
        stats,
    })
}
