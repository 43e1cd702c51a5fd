// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use core::fmt::Debug;

/// A blocking, byte-wide serial port.
///
/// Both operations suspend the caller until they complete. There is no
/// timeout: a port with nothing to read keeps the caller parked forever.
/// Drivers that cannot fail use [`core::convert::Infallible`] as their error.
pub trait Serial {
    type Error: Debug;

    /// Block until one byte has been received, then return it.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Block until `byte` has been accepted for transmission.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl<S: Serial + ?Sized> Serial for &mut S {
    type Error = S::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }
}
