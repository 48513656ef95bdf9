// src/decoder.rs
// Reads the prediction out of the engine's output tensor.

use crate::config::OutputScaling;
use crate::tensor::{Tensor, TensorData};

/// Prediction taken from the first output element.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PredictionResult {
    pub raw: i8,
    /// `raw / divisor`, present when output scaling is configured.
    pub scaled: Option<f32>,
}

pub struct ResultDecoder {
    scaling: Option<OutputScaling>,
}

impl ResultDecoder {
    pub const fn new(scaling: Option<OutputScaling>) -> Self {
        Self { scaling }
    }

    /// Decodes element 0 of an int8 output tensor.
    ///
    /// Returns `None` for empty tensors and for every other element type.
    /// Scaling is done in `f32` so fractional results survive.
    pub fn decode(&self, output: &Tensor) -> Option<PredictionResult> {
        let raw = match output.data() {
            TensorData::Int8(values) => *values.first()?,
            TensorData::UInt8(_) | TensorData::Int32(_) | TensorData::Float32(_) => {
                warn!("Output tensor type {} is not INT8", output.element_type());
                return None;
            }
        };
        let scaled = self.scaling.map(|s| raw as f32 / s.divisor);
        Some(PredictionResult { raw, scaled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ElementType;

    #[test]
    fn test_decode_reads_first_element_only() {
        let decoder = ResultDecoder::new(None);
        let t = Tensor::from_int8(&[-42, 100, 7]).unwrap();
        assert_eq!(
            decoder.decode(&t),
            Some(PredictionResult {
                raw: -42,
                scaled: None
            })
        );
    }

    #[test]
    fn test_decode_scaled_keeps_fraction() {
        let decoder = ResultDecoder::new(Some(OutputScaling { divisor: 4.0 }));
        let t = Tensor::from_int8(&[7]).unwrap();
        let result = decoder.decode(&t).unwrap();
        assert_eq!(result.raw, 7);
        assert_eq!(result.scaled, Some(1.75));
    }

    #[test]
    fn test_decode_skips_non_int8() {
        let decoder = ResultDecoder::new(None);
        for kind in [ElementType::UInt8, ElementType::Int32, ElementType::Float32] {
            let t = Tensor::zeroed(kind, 1).unwrap();
            assert_eq!(decoder.decode(&t), None);
        }
    }

    #[test]
    fn test_decode_empty_tensor() {
        let decoder = ResultDecoder::new(None);
        let t = Tensor::from_int8(&[]).unwrap();
        assert_eq!(decoder.decode(&t), None);
    }
}
