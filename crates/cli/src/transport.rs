// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::io::{self, Read, Write};
use uart_echo_core::{Board, Serial};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("peer closed the stream")]
    Closed,
    #[error("serial stream I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TransportError {
    fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::UnexpectedEof => TransportError::Closed,
            _ => TransportError::Io(err),
        }
    }
}

/// Blocking byte-at-a-time serial port over a host reader/writer pair.
///
/// Every written byte is flushed before `write_byte` returns.
#[derive(Debug)]
pub struct StreamSerial<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> StreamSerial<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> Serial for StreamSerial<R, W> {
    type Error = TransportError;

    fn read_byte(&mut self) -> Result<u8, TransportError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(_) => return Ok(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransportError::from_io(e)),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        self.writer
            .write_all(&[byte])
            .and_then(|()| self.writer.flush())
            .map_err(TransportError::from_io)
    }
}

/// Logs every byte that crosses the wrapped port at `trace` level.
#[derive(Debug)]
pub struct Traced<S> {
    inner: S,
}

impl<S> Traced<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Serial> Serial for Traced<S> {
    type Error = S::Error;

    fn read_byte(&mut self) -> Result<u8, S::Error> {
        let byte = self.inner.read_byte()?;
        tracing::trace!(byte = format_args!("{:#04x}", byte), "rx");
        Ok(byte)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), S::Error> {
        self.inner.write_byte(byte)?;
        tracing::trace!(byte = format_args!("{:#04x}", byte), "tx");
        Ok(())
    }
}

/// A host "board": the stream is already open, so bring-up only hands it out.
#[derive(Debug)]
pub struct HostBoard<S> {
    label: String,
    serial: Option<S>,
}

impl<S: Serial> HostBoard<S> {
    pub fn new(label: impl Into<String>, serial: S) -> Self {
        Self {
            label: label.into(),
            serial: Some(serial),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<S: Serial> Board for HostBoard<S> {
    type Serial = S;

    fn initialize(&mut self) -> S {
        tracing::debug!(peer = %self.label, "initializing host serial");
        self.serial
            .take()
            .expect("HostBoard::initialize called more than once")
    }

    fn enable_interrupts(&mut self) {
        tracing::debug!(peer = %self.label, "interrupts enabled (no-op on host)");
    }
}
