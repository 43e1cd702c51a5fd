// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Host harness for the echo loop: the same `uart_echo_core::Echo` the
//! firmware runs, driven by stdio or TCP streams instead of USART registers.

pub mod serve;
pub mod session;
pub mod transport;

pub use serve::{serve, serve_stdio, serve_tcp};
pub use session::{run_session, SessionOptions, SessionReport, StopReason};
pub use transport::{HostBoard, StreamSerial, Traced, TransportError};
