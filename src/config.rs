// src/config.rs
// Compile-time sizes and the runtime session configuration.

/// Capacity of the serial line buffer, terminator included.
pub const INPUT_BUFFER_SIZE: usize = 32;
/// Capacity of the scratch string used to format responses.
pub const OUTPUT_BUFFER_SIZE: usize = 128;
/// Maximum number of integers parsed from one line; extra tokens are dropped.
pub const INT_ARRAY_SIZE: usize = 8;
/// Number of integers the model input expects.
pub const EXPECTED_INTEGERS: usize = 7;
/// Carriage return ends a command line.
pub const LINE_TERMINATOR: u8 = 13;
pub const BAUD_RATE: u32 = 115_200;

/// Element capacity of every tensor the engine allocates.
pub const TENSOR_CAPACITY: usize = 16;
/// Model schema version the engine accepts.
pub const SCHEMA_VERSION: u32 = 3;

/// Linear mapping from parsed integers to the int8 input domain:
/// `q = (x - offset) * scale + zero_point`, truncated toward zero and then
/// narrowed with wrapping.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuantParams {
    pub offset: f32,
    pub scale: f32,
    pub zero_point: f32,
}

impl QuantParams {
    /// Maps `[0, 6]` onto `[-128, 127]`.
    pub const DEFAULT: Self = Self {
        offset: 0.0,
        scale: 255.0 / 6.0,
        zero_point: -128.0,
    };
}

impl Default for QuantParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Optional rescaling of the int8 prediction, done in `f32`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputScaling {
    pub divisor: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionConfig {
    /// Echo every received byte back to the host.
    pub echo: bool,
    pub quant: QuantParams,
    pub output_scaling: Option<OutputScaling>,
}

impl SessionConfig {
    pub const DEFAULT: Self = Self {
        echo: true,
        quant: QuantParams::DEFAULT,
        output_scaling: None,
    };
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
