#![no_std]
// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.
#![no_main]

//! The echo loop on stm32f1xx-hal's USART1 driver instead of raw registers.
//! Same pins (PA9 TX, PA10 RX) and rate as the register-level build.

use cortex_m_rt::entry;
use panic_halt as _;
use stm32f1xx_hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use uart_echo_core::{Board, HalSerial};

const BAUD_RATE: u32 = 115_200;

#[cfg(feature = "self-test")]
const SELF_TEST_BANNER: &[u8] = b"Hello World!\r\n";

/// Board whose bring-up is a deferred HAL setup closure, run by `initialize`.
struct HalBoard<F> {
    setup: Option<F>,
}

impl<F, S> Board for HalBoard<F>
where
    F: FnOnce() -> S,
    S: uart_echo_core::Serial,
{
    type Serial = S;

    fn initialize(&mut self) -> S {
        match self.setup.take() {
            Some(setup) => setup(),
            None => unreachable!("board initialized twice"),
        }
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: nothing in this firmware relies on running with interrupts masked.
        unsafe { cortex_m::interrupt::enable() };
    }
}

#[entry]
fn main() -> ! {
    // Entry runs once; the peripherals are always available here.
    let dp = pac::Peripherals::take().unwrap();

    let board = HalBoard {
        setup: Some(move || {
            let mut flash = dp.FLASH.constrain();
            let rcc = dp.RCC.constrain();
            let clocks = rcc.cfgr.freeze(&mut flash.acr);

            let mut afio = dp.AFIO.constrain();
            let mut gpioa = dp.GPIOA.split();
            let tx = gpioa.pa9.into_alternate_push_pull(&mut gpioa.crh);
            let rx = gpioa.pa10;

            let serial = Serial::new(
                dp.USART1,
                (tx, rx),
                &mut afio.mapr,
                Config::default().baudrate(BAUD_RATE.bps()),
                &clocks,
            );
            HalSerial::new(serial)
        }),
    };

    #[allow(unused_mut)]
    let mut echo = uart_echo_core::boot(board);

    #[cfg(feature = "self-test")]
    let _ = echo.announce(SELF_TEST_BANNER);

    echo.run()
}
