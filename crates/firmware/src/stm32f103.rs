// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! STM32F103 bring-up for USART1 on PA9 (TX) / PA10 (RX).
//!
//! Runs off the 8 MHz HSI the chip resets into; no PLL setup.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, Ordering};
use uart_echo_core::{Board, Serial};

const RCC_BASE: u32 = 0x4002_1000;
const GPIOA_BASE: u32 = 0x4001_0800;
const USART1_BASE: u32 = 0x4001_3800;

// RCC
const RCC_APB2ENR: *mut u32 = (RCC_BASE + 0x18) as *mut u32;
const RCC_APB2ENR_AFIOEN: u32 = 1 << 0;
const RCC_APB2ENR_IOPAEN: u32 = 1 << 2;
const RCC_APB2ENR_USART1EN: u32 = 1 << 14;

// GPIOA (pins 8..15)
const GPIOA_CRH: *mut u32 = (GPIOA_BASE + 0x04) as *mut u32;
// PA9: MODE=11 (50 MHz output), CNF=10 (alternate function push-pull)
const PA9_AF_PP_50MHZ: u32 = 0xB;
// PA10: MODE=00 (input), CNF=01 (floating)
const PA10_INPUT_FLOATING: u32 = 0x4;

// USART1
const USART1_SR: *const u32 = USART1_BASE as *const u32;
const USART1_DR: *mut u32 = (USART1_BASE + 0x04) as *mut u32;
const USART1_BRR: *mut u32 = (USART1_BASE + 0x08) as *mut u32;
const USART1_CR1: *mut u32 = (USART1_BASE + 0x0C) as *mut u32;

const SR_RXNE: u32 = 1 << 5;
const SR_TXE: u32 = 1 << 7;
const CR1_RE: u32 = 1 << 2;
const CR1_TE: u32 = 1 << 3;
const CR1_UE: u32 = 1 << 13;

const PCLK2_HZ: u32 = 8_000_000;
pub const BAUD_RATE: u32 = 115_200;
// USARTDIV in 12.4 fixed point is just PCLK / baud, rounded.
const BRR_VALUE: u32 = (PCLK2_HZ + BAUD_RATE / 2) / BAUD_RATE;

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Exclusive handle to the clocks, GPIOA and USART1 of the chip.
pub struct Stm32f103 {
    _private: (),
}

impl Stm32f103 {
    /// Returns the board handle once; later calls get `None`.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { _private: () })
        }
    }
}

impl Board for Stm32f103 {
    type Serial = Usart1;

    fn initialize(&mut self) -> Usart1 {
        unsafe {
            let apb2 = core::ptr::read_volatile(RCC_APB2ENR);
            core::ptr::write_volatile(
                RCC_APB2ENR,
                apb2 | RCC_APB2ENR_AFIOEN | RCC_APB2ENR_IOPAEN | RCC_APB2ENR_USART1EN,
            );

            let crh = core::ptr::read_volatile(GPIOA_CRH);
            let crh = (crh & !(0xFF << 4)) | (PA9_AF_PP_50MHZ << 4) | (PA10_INPUT_FLOATING << 8);
            core::ptr::write_volatile(GPIOA_CRH, crh);

            // 8N1 is the CR1/CR2 reset state; only the rate and enables are set.
            core::ptr::write_volatile(USART1_BRR, BRR_VALUE);
            core::ptr::write_volatile(USART1_CR1, CR1_UE | CR1_TE | CR1_RE);
        }

        Usart1 { _private: () }
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: nothing in this firmware relies on running with interrupts masked.
        unsafe { cortex_m::interrupt::enable() };
    }
}

/// Polled USART1. Only obtainable through [`Stm32f103::initialize`].
pub struct Usart1 {
    _private: (),
}

impl Serial for Usart1 {
    type Error = Infallible;

    fn read_byte(&mut self) -> Result<u8, Infallible> {
        unsafe {
            while core::ptr::read_volatile(USART1_SR) & SR_RXNE == 0 {}
            // Reading DR clears RXNE (and a pending overrun flag after the SR read).
            Ok(core::ptr::read_volatile(USART1_DR) as u8)
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Infallible> {
        unsafe {
            while core::ptr::read_volatile(USART1_SR) & SR_TXE == 0 {}
            core::ptr::write_volatile(USART1_DR, byte as u32);
        }
        Ok(())
    }
}
