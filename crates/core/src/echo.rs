// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::serial::Serial;

/// Counters kept by the echo loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EchoStats {
    /// Bytes read and successfully written back.
    pub bytes_echoed: u64,
    pub read_errors: u64,
    pub write_errors: u64,
}

/// Mirrors everything received on a serial port back to the same port.
#[derive(Debug)]
pub struct Echo<S> {
    serial: S,
    stats: EchoStats,
}

impl<S: Serial> Echo<S> {
    pub fn new(serial: S) -> Self {
        Self {
            serial,
            stats: EchoStats::default(),
        }
    }

    /// Read one byte and write the same byte back.
    ///
    /// A failed read skips the write. Either failure is counted and returned.
    pub fn step(&mut self) -> Result<u8, S::Error> {
        let byte = match self.serial.read_byte() {
            Ok(byte) => byte,
            Err(e) => {
                self.stats.read_errors = self.stats.read_errors.saturating_add(1);
                return Err(e);
            }
        };

        if let Err(e) = self.serial.write_byte(byte) {
            self.stats.write_errors = self.stats.write_errors.saturating_add(1);
            return Err(e);
        }

        self.stats.bytes_echoed = self.stats.bytes_echoed.saturating_add(1);
        Ok(byte)
    }

    /// Echo forever. Errors are counted and the loop carries on.
    pub fn run(mut self) -> ! {
        loop {
            let _ = self.step();
        }
    }

    /// Transmit a fixed message, e.g. a power-on greeting, before echoing.
    ///
    /// Stops at the first write failure.
    pub fn announce(&mut self, message: &[u8]) -> Result<(), S::Error> {
        for &byte in message {
            if let Err(e) = self.serial.write_byte(byte) {
                self.stats.write_errors = self.stats.write_errors.saturating_add(1);
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> EchoStats {
        self.stats
    }

    pub fn into_inner(self) -> S {
        self.serial
    }
}
