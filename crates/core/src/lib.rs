// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Blocking byte echo loop shared by the firmware and the host harness.
//!
//! The loop only ever talks to two capabilities: a [`Board`] that is
//! initialized once, and the [`Serial`] handle that initialization yields.
//! Everything register-level lives behind those traits.

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod echo;
pub mod hal;
pub mod serial;

pub use board::{boot, Board};
pub use echo::{Echo, EchoStats};
pub use hal::{HalError, HalSerial};
pub use serial::Serial;
