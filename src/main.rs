#![no_std]
#![no_main]

// Panic handler
use core::panic::PanicInfo;
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    // On panic, loop indefinitely.
    loop {
        // Keep the loop from being optimized away.
        cortex_m::asm::nop();
    }
}

use core::fmt::Write as _;

// Entry point
use cortex_m_rt::entry;
use defmt_rtt as _;
use embedded_hal::digital::v2::OutputPin;
use heapless::String;

// HAL and PAC for RP2040
use rp2040_hal::{
    clocks::{init_clocks_and_plls, Clock as _},
    fugit::RateExtU32,
    gpio::{FunctionUart, Pins},
    pac,
    sio::Sio,
    uart::{DataBits, StopBits, UartConfig, UartPeripheral},
    watchdog::Watchdog,
    Timer,
};

use quant_serial_mcu::{
    board_pins,
    config::{SessionConfig, BAUD_RATE},
    engine::{DenseModel, DEFAULT_MODEL},
    hal::Uart,
    rp2040_hal_impl::{Rp2040Clock, Rp2040Uart},
    DenseEngine, Session,
};

/// Second-stage bootloader for the Pico's W25Q080 flash.
#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

static MODEL: DenseModel = DEFAULT_MODEL;

#[entry]
fn main() -> ! {
    // Setup peripherals
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let sio = Sio::new(pac.SIO);

    let clocks = defmt::unwrap!(init_clocks_and_plls(
        board_pins::XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok());

    let mut delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let uart_pins = (
        pins.gpio0.into_function::<FunctionUart>(),
        pins.gpio1.into_function::<FunctionUart>(),
    );
    let hal_uart = defmt::unwrap!(UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(BAUD_RATE.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .ok());
    defmt::info!(
        "UART0 on GPIO{}/GPIO{} at {} baud",
        board_pins::UART_TX_PIN,
        board_pins::UART_RX_PIN,
        BAUD_RATE
    );

    let mut uart = Rp2040Uart::new(hal_uart);
    let clock = Rp2040Clock::new(timer);
    let mut led_pin = pins.gpio25.into_push_pull_output();

    if let Err(e) = uart.write_blocking(b"Starting setup...\r\n") {
        defmt::error!("Startup banner not sent: {}", e);
    }

    match DenseEngine::new(&MODEL) {
        Ok(mut engine) => {
            if let Err(e) = uart.write_blocking(b"Input tensor initialized in setup()\r\n") {
                defmt::error!("Setup report not sent: {}", e);
            }
            defmt::info!("Setup complete, waiting for input");

            let mut session = Session::new(SessionConfig::DEFAULT);
            loop {
                if let Err(e) = session.poll(&mut uart, &clock, &mut engine) {
                    defmt::error!("Session error: {}", e);
                }
            }
        }
        Err(e) => {
            defmt::error!("Engine setup failed: {}", e);
            let mut msg: String<96> = String::new();
            if write!(msg, "Failed to initialise inference engine: {:?}\r\n", e).is_err() {
                defmt::warn!("Failure report truncated");
            }
            if let Err(e) = uart.write_blocking(msg.as_bytes()).and_then(|()| uart.flush()) {
                defmt::error!("Failure report not sent: {}", e);
            }

            // Setup halted; blink the status LED.
            defmt::info!("Blinking status LED on GPIO{}", board_pins::STATUS_LED_PIN);
            loop {
                let _ = led_pin.set_high();
                delay.delay_ms(100);
                let _ = led_pin.set_low();
                delay.delay_ms(100);
            }
        }
    }
}
