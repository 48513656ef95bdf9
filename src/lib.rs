#![cfg_attr(not(test), no_std)]

//! Serial front end for an on-device int8 model.
//!
//! A host types comma-separated integers terminated by a carriage return;
//! the firmware echoes them, parses and quantizes the vector into the
//! engine's input tensor, runs inference and reports the int8 prediction
//! with print/inference timings. Everything here is allocation-free and
//! runs on the host for tests; `main.rs` wires it to the RP2040.

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

// --- Public Modules ---
pub mod board_pins;
pub mod command_parser;
pub mod config;
pub mod decoder;
pub mod engine;
pub mod hal;        // Hardware Abstraction Layer traits
pub mod line_buffer;
pub mod quantizer;
pub mod session;    // Polling loop context
pub mod tensor;
pub mod timing;
pub mod utils;      // Timer arithmetic

#[cfg(feature = "rp2040")]
pub mod rp2040_hal_impl;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{DenseEngine, EngineError, InferenceEngine};
pub use session::{CycleReport, FeedOutcome, Session, SessionError};
