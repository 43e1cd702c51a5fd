// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::echo::Echo;
use crate::serial::Serial;

/// One-time hardware bring-up for a target.
///
/// `initialize` configures clocks, pin muxing and peripherals and hands back
/// the serial capability. Both steps are assumed to succeed.
pub trait Board {
    type Serial: Serial;

    /// Set up every hardware subsystem and return the configured serial port.
    fn initialize(&mut self) -> Self::Serial;

    /// Globally enable interrupts.
    fn enable_interrupts(&mut self);
}

/// Bring a board up and wrap its serial port in an [`Echo`] loop.
///
/// Initialization runs exactly once, before interrupts are enabled. The board
/// is consumed, so the port cannot be obtained (and therefore not used)
/// before this returns.
pub fn boot<B: Board>(mut board: B) -> Echo<B::Serial> {
    let serial = board.initialize();
    board.enable_interrupts();
    Echo::new(serial)
}
