// src/engine.rs
// Inference engine contract and a small int8 reference engine.

use crate::config::SCHEMA_VERSION;
use crate::tensor::{ElementType, Tensor};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Model was built for a different schema.
    SchemaVersionMismatch { found: u32, expected: u32 },
    /// A tensor does not fit the preallocated arena.
    ArenaExhausted { requested: usize, capacity: usize },
    /// Weight or bias tables disagree with the declared tensor shapes.
    ShapeMismatch,
    /// The engine cannot compute on tensors of this element type.
    UnsupportedType(ElementType),
}

/// What the session needs from an inference engine: one input tensor to
/// write, one output tensor to read and a forward pass in between.
///
/// Tensors are allocated once when the engine is built and never resized.
pub trait InferenceEngine {
    fn input_mut(&mut self) -> &mut Tensor;
    fn output(&self) -> &Tensor;
    /// Runs the forward pass over the current input tensor.
    fn invoke(&mut self) -> Result<(), EngineError>;
}

/// A single fully connected int8 layer.
///
/// `out[o] = sat_i8(round((bias[o] + sum_i (in[i] - input_zero_point) * w[o][i])
/// * output_multiplier) + output_zero_point)`, weights row-major by output.
#[derive(Copy, Clone, Debug)]
pub struct DenseModel {
    pub version: u32,
    pub input_type: ElementType,
    pub output_type: ElementType,
    pub input_len: usize,
    pub output_len: usize,
    pub weights: &'static [i8],
    pub bias: &'static [i32],
    pub input_zero_point: i32,
    pub output_zero_point: i32,
    pub output_multiplier: f32,
}

/// Model flashed with the firmware: 7 int8 inputs, one int8 score.
pub const DEFAULT_MODEL: DenseModel = DenseModel {
    version: SCHEMA_VERSION,
    input_type: ElementType::Int8,
    output_type: ElementType::Int8,
    input_len: 7,
    output_len: 1,
    weights: &[3, -2, 5, 1, -4, 2, 6],
    bias: &[0],
    input_zero_point: -128,
    output_zero_point: 0,
    output_multiplier: 1.0 / 64.0,
};

/// Reference engine evaluating a [`DenseModel`].
pub struct DenseEngine {
    model: &'static DenseModel,
    input: Tensor,
    output: Tensor,
}

impl DenseEngine {
    /// Validates `model` and allocates its tensors.
    pub fn new(model: &'static DenseModel) -> Result<Self, EngineError> {
        if model.version != SCHEMA_VERSION {
            return Err(EngineError::SchemaVersionMismatch {
                found: model.version,
                expected: SCHEMA_VERSION,
            });
        }
        if model.weights.len() != model.input_len * model.output_len
            || model.bias.len() != model.output_len
        {
            return Err(EngineError::ShapeMismatch);
        }
        let input = Tensor::zeroed(model.input_type, model.input_len)?;
        let output = Tensor::zeroed(model.output_type, model.output_len)?;
        info!(
            "DenseEngine ready: {} inputs, {} outputs",
            model.input_len,
            model.output_len
        );
        Ok(Self {
            model,
            input,
            output,
        })
    }
}

impl InferenceEngine for DenseEngine {
    fn input_mut(&mut self) -> &mut Tensor {
        &mut self.input
    }

    fn output(&self) -> &Tensor {
        &self.output
    }

    fn invoke(&mut self) -> Result<(), EngineError> {
        let model = self.model;
        let input = self
            .input
            .as_int8()
            .ok_or(EngineError::UnsupportedType(self.input.element_type()))?;
        let output_type = self.output.element_type();
        let output = self
            .output
            .as_int8_mut()
            .ok_or(EngineError::UnsupportedType(output_type))?;

        for (o, out) in output.iter_mut().enumerate() {
            let row = &model.weights[o * model.input_len..(o + 1) * model.input_len];
            let acc = row
                .iter()
                .zip(input.iter())
                .fold(model.bias[o], |acc, (&w, &x)| {
                    acc.wrapping_add((x as i32 - model.input_zero_point) * w as i32)
                });
            let scaled = round_half_away(acc as f32 * model.output_multiplier);
            *out = scaled
                .saturating_add(model.output_zero_point)
                .clamp(i8::MIN as i32, i8::MAX as i32) as i8;
        }
        Ok(())
    }
}

// f32::round lives in std; this is the same rounding on core.
fn round_half_away(x: f32) -> i32 {
    if x >= 0.0 {
        (x + 0.5) as i32
    } else {
        (x - 0.5) as i32
    }
}
