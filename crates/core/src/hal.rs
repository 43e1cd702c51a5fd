// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::serial::Serial;
use embedded_hal::serial;

/// Error from a [`HalSerial`], tagged with the direction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError<R, W> {
    Read(R),
    Write(W),
}

/// Blocking [`Serial`] on top of a non-blocking embedded-hal 0.2 driver.
///
/// `WouldBlock` is spun on until the driver makes progress. Writes return
/// once the driver has taken the byte; the transmitter is not flushed.
#[derive(Debug)]
pub struct HalSerial<S> {
    inner: S,
}

impl<S> HalSerial<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn free(self) -> S {
        self.inner
    }
}

impl<S> Serial for HalSerial<S>
where
    S: serial::Read<u8> + serial::Write<u8>,
    <S as serial::Read<u8>>::Error: core::fmt::Debug,
    <S as serial::Write<u8>>::Error: core::fmt::Debug,
{
    type Error = HalError<<S as serial::Read<u8>>::Error, <S as serial::Write<u8>>::Error>;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        nb::block!(serial::Read::read(&mut self.inner)).map_err(HalError::Read)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        nb::block!(serial::Write::write(&mut self.inner, byte)).map_err(HalError::Write)
    }
}
