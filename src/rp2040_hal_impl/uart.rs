// src/rp2040_hal_impl/uart.rs

use core::fmt::Debug;

use embedded_hal::serial::{Read, Write};

use crate::hal::{Uart, UartError};

/// Wrapper for a configured RP2040 UART peripheral that implements our `Uart` trait.
/// `UART` is the concrete `rp2040_hal::uart::UartPeripheral<Enabled, ...>` instance,
/// or anything else speaking the embedded-hal 0.2 serial traits.
pub struct Rp2040Uart<UART> {
    hal_uart: UART,
}

impl<UART> Rp2040Uart<UART> {
    /// The `hal_uart` instance must already be fully configured and enabled.
    pub fn new(hal_uart: UART) -> Self {
        Self { hal_uart }
    }

    /// Consumes the wrapper and returns the inner HAL UART peripheral.
    pub fn into_inner(self) -> UART {
        self.hal_uart
    }
}

impl<UART, RE, WE> Uart for Rp2040Uart<UART>
where
    UART: Read<u8, Error = RE> + Write<u8, Error = WE>,
    RE: Debug,
    WE: Debug,
{
    fn write_blocking(&mut self, words: &[u8]) -> Result<(), UartError> {
        for &word in words {
            nb::block!(self.hal_uart.write(word)).map_err(|_e| {
                defmt::error!("UART Write Error: {:?}", defmt::Debug2Format(&_e));
                UartError::WriteError
            })?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, UartError> {
        match self.hal_uart.read() {
            Ok(byte) => Ok(Some(byte)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(_e)) => {
                defmt::error!("UART Read Error: {:?}", defmt::Debug2Format(&_e));
                Err(UartError::ReadError)
            }
        }
    }

    fn flush(&mut self) -> Result<(), UartError> {
        nb::block!(self.hal_uart.flush()).map_err(|_e| {
            defmt::error!("UART Flush Error: {:?}", defmt::Debug2Format(&_e));
            UartError::WriteError // Typically flush errors are write-related
        })
    }
}
