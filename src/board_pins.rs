// src/board_pins.rs
// Pin assignments for the Raspberry Pi Pico.

/// UART0 TX, wired to the host's RX.
pub const UART_TX_PIN: u8 = 0;
/// UART0 RX, wired to the host's TX.
pub const UART_RX_PIN: u8 = 1;
/// On-board LED, blinked when setup fails.
pub const STATUS_LED_PIN: u8 = 25;

/// External crystal on the Pico board.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;
