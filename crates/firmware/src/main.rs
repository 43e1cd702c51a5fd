#![no_std]
// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.
#![no_main]

mod stm32f103;

use cortex_m_rt::entry;
use panic_halt as _;
use stm32f103::Stm32f103;
// With `hal` on, cortex-m-rt expects the PAC's interrupt vectors in every bin.
#[cfg(feature = "hal")]
use stm32f1xx_hal as _;

#[cfg(feature = "self-test")]
const SELF_TEST_BANNER: &[u8] = b"Hello World!\r\n";

#[entry]
fn main() -> ! {
    // Entry runs once; the handle is always available here.
    let board = Stm32f103::take().unwrap();
    #[allow(unused_mut)]
    let mut echo = uart_echo_core::boot(board);

    #[cfg(feature = "self-test")]
    let _ = echo.announce(SELF_TEST_BANNER);

    echo.run()
}
