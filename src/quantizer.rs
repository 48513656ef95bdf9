// src/quantizer.rs
// Maps parsed integers into the engine's int8 input tensor.

use crate::config::{QuantParams, EXPECTED_INTEGERS};
use crate::tensor::{ElementType, Tensor, TensorData};

/// Outcome of writing a quantized vector into the input tensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QuantizeOutcome {
    /// Values written to the first `EXPECTED_INTEGERS` tensor elements.
    Written([i8; EXPECTED_INTEGERS]),
    /// The tensor holds another element type; nothing was written.
    Skipped(ElementType),
}

pub struct Quantizer {
    params: QuantParams,
}

impl Quantizer {
    pub const fn new(params: QuantParams) -> Self {
        Self { params }
    }

    /// Quantizes one integer.
    ///
    /// The affine value is computed in `f32`, truncated toward zero to `i32`
    /// and then narrowed to `i8` by keeping the low byte. There is no
    /// clamping: with the default parameters 0 maps to -128, 6 to 127 and 7
    /// wraps around to -87.
    pub fn quantize_value(&self, x: i32) -> i8 {
        let p = &self.params;
        let q = (x as f32 - p.offset) * p.scale + p.zero_point;
        (q as i32) as i8
    }

    pub fn quantize(&self, ints: &[i32; EXPECTED_INTEGERS]) -> [i8; EXPECTED_INTEGERS] {
        let mut out = [0i8; EXPECTED_INTEGERS];
        for (dst, &x) in out.iter_mut().zip(ints.iter()) {
            *dst = self.quantize_value(x);
        }
        out
    }

    /// Quantizes `ints` into the leading elements of `tensor`.
    ///
    /// Trailing tensor elements keep their previous contents. Only int8
    /// tensors are written; any other element type is reported as skipped.
    pub fn quantize_into(
        &self,
        ints: &[i32; EXPECTED_INTEGERS],
        tensor: &mut Tensor,
    ) -> QuantizeOutcome {
        match tensor.data_mut() {
            TensorData::Int8(buf) => {
                let values = self.quantize(ints);
                for (dst, &q) in buf.iter_mut().zip(values.iter()) {
                    *dst = q;
                }
                QuantizeOutcome::Written(values)
            }
            TensorData::UInt8(_) => QuantizeOutcome::Skipped(ElementType::UInt8),
            TensorData::Int32(_) => QuantizeOutcome::Skipped(ElementType::Int32),
            TensorData::Float32(_) => QuantizeOutcome::Skipped(ElementType::Float32),
        }
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(QuantParams::DEFAULT)
    }
}
