// src/session.rs
// The polling loop's context: owns the line buffer and output scratch space
// and drives one line through parse -> quantize -> invoke -> decode -> report.

use core::fmt::{self, Write};

use heapless::String;

use crate::command_parser::{parse_integers, IntegerVector};
use crate::config::{SessionConfig, EXPECTED_INTEGERS, INPUT_BUFFER_SIZE, OUTPUT_BUFFER_SIZE};
use crate::decoder::{PredictionResult, ResultDecoder};
use crate::engine::{EngineError, InferenceEngine};
use crate::hal::{Clock, Uart, UartError};
use crate::line_buffer::{LineBuffer, LineStatus};
use crate::quantizer::{QuantizeOutcome, Quantizer};
use crate::timing::{mark, TimingSample};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    Uart(UartError),
    /// A response line did not fit the scratch buffer.
    Format,
}

impl From<UartError> for SessionError {
    fn from(e: UartError) -> Self {
        SessionError::Uart(e)
    }
}

/// What happened to one processed line.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleReport {
    /// Not exactly `EXPECTED_INTEGERS` integers; the warning was sent.
    WrongCount { count: usize },
    /// The inference path ran. Stages that could not run are `None`/`Skipped`.
    Inferred {
        quantized: QuantizeOutcome,
        invoke_error: Option<EngineError>,
        prediction: Option<PredictionResult>,
        timing: TimingSample,
    },
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedOutcome {
    Accumulating,
    /// The partial line was dropped; nothing but the echo went out.
    Overflow,
    Processed(CycleReport),
}

pub struct Session {
    line: LineBuffer<INPUT_BUFFER_SIZE>,
    scratch: String<OUTPUT_BUFFER_SIZE>,
    quantizer: Quantizer,
    decoder: ResultDecoder,
    echo: bool,
}

impl Session {
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            line: LineBuffer::new(),
            scratch: String::new(),
            quantizer: Quantizer::new(config.quant),
            decoder: ResultDecoder::new(config.output_scaling),
            echo: config.echo,
        }
    }

    /// Bytes of the line received so far.
    pub fn pending(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Handles at most one received byte. `Ok(None)` when nothing was pending.
    pub fn poll<U, C, E>(
        &mut self,
        uart: &mut U,
        clock: &C,
        engine: &mut E,
    ) -> Result<Option<FeedOutcome>, SessionError>
    where
        U: Uart,
        C: Clock,
        E: InferenceEngine,
    {
        match uart.read_byte()? {
            Some(byte) => self.feed(byte, uart, clock, engine).map(Some),
            None => Ok(None),
        }
    }

    /// Echoes `byte`, buffers it and, on a terminator, processes the line to
    /// completion before returning. The buffer is empty again afterwards.
    pub fn feed<U, C, E>(
        &mut self,
        byte: u8,
        uart: &mut U,
        clock: &C,
        engine: &mut E,
    ) -> Result<FeedOutcome, SessionError>
    where
        U: Uart,
        C: Clock,
        E: InferenceEngine,
    {
        if self.echo {
            uart.write_blocking(&[byte])?;
        }
        match self.line.feed(byte) {
            LineStatus::Accumulating => Ok(FeedOutcome::Accumulating),
            LineStatus::Overflow => {
                debug!("Line longer than {} bytes dropped", INPUT_BUFFER_SIZE);
                Ok(FeedOutcome::Overflow)
            }
            LineStatus::Ready => {
                let report = self.process_line(uart, clock, engine);
                self.line.clear();
                report.map(FeedOutcome::Processed)
            }
        }
    }

    fn process_line<U, C, E>(
        &mut self,
        uart: &mut U,
        clock: &C,
        engine: &mut E,
    ) -> Result<CycleReport, SessionError>
    where
        U: Uart,
        C: Clock,
        E: InferenceEngine,
    {
        uart.write_blocking(b"About to process line: ")?;
        uart.write_blocking(self.line.as_bytes())?;
        uart.write_blocking(b"\r\n")?;

        let parsed = parse_integers(self.line.as_bytes());
        emit(
            uart,
            &mut self.scratch,
            format_args!("Read in  {} integers: ", parsed.len()),
        )?;
        self.write_integer_list(uart, &parsed)?;

        let ints: &[i32; EXPECTED_INTEGERS] = match parsed.as_slice().try_into() {
            Ok(ints) => ints,
            Err(_) => {
                emit(
                    uart,
                    &mut self.scratch,
                    format_args!(
                        "Warning: You must enter exactly {} integers.\r\n",
                        EXPECTED_INTEGERS
                    ),
                )?;
                return Ok(CycleReport::WrongCount {
                    count: parsed.len(),
                });
            }
        };

        let start = mark(clock);
        uart.write_blocking(b"test statement\r\n")?;
        let mid = mark(clock);

        self.write_parsed(uart, ints)?;
        uart.write_blocking(b"Ltest1\r\n")?;

        let input = engine.input_mut();
        let input_kind = input.element_type();
        let quantized = self.quantizer.quantize_into(ints, input);
        let (invoke_error, prediction) = match quantized {
            QuantizeOutcome::Written(_) => {
                emit(
                    uart,
                    &mut self.scratch,
                    format_args!("Input tensor type: {}\r\n", input_kind.name()),
                )?;
                match engine.invoke() {
                    Ok(()) => (None, self.decoder.decode(engine.output())),
                    Err(e) => {
                        error!("Invoke failed: {}", e);
                        uart.write_blocking(b"Invoke failed.\r\n")?;
                        (Some(e), None)
                    }
                }
            }
            QuantizeOutcome::Skipped(kind) => {
                warn!("Input tensor type {} is not INT8, invoke skipped", kind);
                (None, self.decoder.decode(engine.output()))
            }
        };

        if let Some(p) = prediction {
            emit(
                uart,
                &mut self.scratch,
                format_args!("Prediction result (int8): {}\r\n", p.raw),
            )?;
            if let Some(scaled) = p.scaled {
                emit(
                    uart,
                    &mut self.scratch,
                    format_args!("Prediction scaled: {:.3}\r\n", scaled),
                )?;
            }
        }
        let end = mark(clock);

        let timing = TimingSample {
            start,
            mid,
            end,
            clock_freq: clock.get_clock_freq(),
        };
        emit(
            uart,
            &mut self.scratch,
            format_args!(
                "Printing time = {} us.  Inference time = {} us.\r\n",
                timing.print_duration_us(),
                timing.inference_duration_us()
            ),
        )?;

        Ok(CycleReport::Inferred {
            quantized,
            invoke_error,
            prediction,
            timing,
        })
    }

    // "Integers: [1, 2, 3, ]\r\n"
    fn write_integer_list<U: Uart>(
        &mut self,
        uart: &mut U,
        ints: &IntegerVector,
    ) -> Result<(), SessionError> {
        self.scratch.clear();
        write_list(&mut self.scratch, ints).map_err(|_| SessionError::Format)?;
        uart.write_blocking(self.scratch.as_bytes())?;
        Ok(())
    }

    // "Parsed integers: 1 2 3 4 5 6 7 \r\n"
    fn write_parsed<U: Uart>(&mut self, uart: &mut U, ints: &[i32]) -> Result<(), SessionError> {
        self.scratch.clear();
        self.scratch
            .push_str("Parsed integers: ")
            .map_err(|_| SessionError::Format)?;
        for n in ints {
            write!(self.scratch, "{} ", n).map_err(|_| SessionError::Format)?;
        }
        self.scratch
            .push_str("\r\n")
            .map_err(|_| SessionError::Format)?;
        uart.write_blocking(self.scratch.as_bytes())?;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::DEFAULT)
    }
}

fn write_list<W: Write>(out: &mut W, ints: &[i32]) -> fmt::Result {
    out.write_str("Integers: [")?;
    for n in ints {
        write!(out, "{}, ", n)?;
    }
    out.write_str("]\r\n")
}

fn emit<U: Uart>(
    uart: &mut U,
    scratch: &mut String<OUTPUT_BUFFER_SIZE>,
    args: fmt::Arguments<'_>,
) -> Result<(), SessionError> {
    scratch.clear();
    scratch.write_fmt(args).map_err(|_| SessionError::Format)?;
    uart.write_blocking(scratch.as_bytes())?;
    Ok(())
}
