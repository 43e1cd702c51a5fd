// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::collections::VecDeque;
use std::convert::Infallible;
use uart_echo_core::{boot, Board, Serial};

/// Loopback wire: what the "host" types lands in `rx`, whatever the firmware
/// transmits lands in `tx`.
#[derive(Default)]
struct Wire {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl Serial for Wire {
    type Error = Infallible;

    fn read_byte(&mut self) -> Result<u8, Infallible> {
        Ok(self.rx.pop_front().expect("read past end of test input"))
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Infallible> {
        self.tx.push(byte);
        Ok(())
    }
}

struct BenchBoard {
    input: Vec<u8>,
    interrupts_enabled: bool,
}

impl Board for BenchBoard {
    type Serial = Wire;

    fn initialize(&mut self) -> Wire {
        assert!(!self.interrupts_enabled, "interrupts enabled before init");
        Wire {
            rx: self.input.iter().copied().collect(),
            tx: Vec::new(),
        }
    }

    fn enable_interrupts(&mut self) {
        self.interrupts_enabled = true;
    }
}

fn echo_through_board(input: &[u8]) -> Vec<u8> {
    let mut echo = boot(BenchBoard {
        input: input.to_vec(),
        interrupts_enabled: false,
    });
    for _ in 0..input.len() {
        echo.step().unwrap();
    }
    assert_eq!(echo.stats().bytes_echoed, input.len() as u64);
    echo.into_inner().tx
}

#[test]
fn test_empty_input_echoes_nothing() {
    assert!(echo_through_board(&[]).is_empty());
}

#[test]
fn test_text_line_is_mirrored() {
    let line = b"The quick brown fox\r\n";
    assert_eq!(echo_through_board(line), line.to_vec());
}

#[test]
fn test_binary_burst_is_mirrored() {
    let burst: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(31) >> 3) as u8).collect();
    assert_eq!(echo_through_board(&burst), burst);
}
