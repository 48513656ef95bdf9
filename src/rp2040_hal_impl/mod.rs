// src/rp2040_hal_impl/mod.rs

// This module provides RP2040-specific implementations of the HAL traits
// defined in `crate::hal`.

pub mod timer;
pub mod uart;

pub use timer::Rp2040Clock;
pub use uart::Rp2040Uart;
