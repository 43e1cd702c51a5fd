// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use proptest::prelude::*;
use std::collections::VecDeque;
use uart_echo_core::{Echo, Serial};

#[derive(Debug, PartialEq, Eq)]
struct Idle;

/// Wire that reports `Idle` once its input is used up.
struct Wire {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl Serial for Wire {
    type Error = Idle;

    fn read_byte(&mut self) -> Result<u8, Idle> {
        self.rx.pop_front().ok_or(Idle)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Idle> {
        self.tx.push(byte);
        Ok(())
    }
}

proptest! {
    #[test]
    fn echo_output_equals_input(input in prop::collection::vec(any::<u8>(), 0..2048)) {
        let mut echo = Echo::new(Wire { rx: input.iter().copied().collect(), tx: Vec::new() });
        while echo.step().is_ok() {}

        prop_assert_eq!(echo.stats().bytes_echoed, input.len() as u64);
        prop_assert_eq!(echo.stats().read_errors, 1);
        prop_assert_eq!(echo.into_inner().tx, input);
    }

    #[test]
    fn each_step_echoes_exactly_the_byte_read(byte in any::<u8>()) {
        let mut echo = Echo::new(Wire { rx: VecDeque::from(vec![byte]), tx: Vec::new() });
        prop_assert_eq!(echo.step(), Ok(byte));
        prop_assert_eq!(echo.step(), Err(Idle));
        prop_assert_eq!(echo.into_inner().tx, vec![byte]);
    }
}
