// src/tensor.rs
// Typed tensor storage shared between the pipeline and the inference engine.

use heapless::Vec;

use crate::config::TENSOR_CAPACITY;
use crate::engine::EngineError;

/// Element kinds an engine tensor may hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElementType {
    Int8,
    UInt8,
    Int32,
    Float32,
}

impl ElementType {
    /// Upper-case name as printed in diagnostics ("INT8").
    pub const fn name(self) -> &'static str {
        match self {
            ElementType::Int8 => "INT8",
            ElementType::UInt8 => "UINT8",
            ElementType::Int32 => "INT32",
            ElementType::Float32 => "FLOAT32",
        }
    }
}

/// Backing storage, tagged by element type.
#[derive(Clone, Debug, PartialEq)]
pub enum TensorData {
    Int8(Vec<i8, TENSOR_CAPACITY>),
    UInt8(Vec<u8, TENSOR_CAPACITY>),
    Int32(Vec<i32, TENSOR_CAPACITY>),
    Float32(Vec<f32, TENSOR_CAPACITY>),
}

/// A fixed-length tensor. Its length and element type are set once at
/// allocation; writers only ever modify elements in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: TensorData,
}

impl Tensor {
    /// Allocates `len` zeroed elements of type `kind`.
    pub fn zeroed(kind: ElementType, len: usize) -> Result<Self, EngineError> {
        if len > TENSOR_CAPACITY {
            return Err(EngineError::ArenaExhausted {
                requested: len,
                capacity: TENSOR_CAPACITY,
            });
        }
        let data = match kind {
            ElementType::Int8 => TensorData::Int8(filled(0, len)),
            ElementType::UInt8 => TensorData::UInt8(filled(0, len)),
            ElementType::Int32 => TensorData::Int32(filled(0, len)),
            ElementType::Float32 => TensorData::Float32(filled(0.0, len)),
        };
        Ok(Self { data })
    }

    /// Wraps int8 values, e.g. a canned engine output.
    pub fn from_int8(values: &[i8]) -> Result<Self, EngineError> {
        let data = Vec::from_slice(values).map_err(|_| EngineError::ArenaExhausted {
            requested: values.len(),
            capacity: TENSOR_CAPACITY,
        })?;
        Ok(Self {
            data: TensorData::Int8(data),
        })
    }

    pub fn element_type(&self) -> ElementType {
        match self.data {
            TensorData::Int8(_) => ElementType::Int8,
            TensorData::UInt8(_) => ElementType::UInt8,
            TensorData::Int32(_) => ElementType::Int32,
            TensorData::Float32(_) => ElementType::Float32,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            TensorData::Int8(v) => v.len(),
            TensorData::UInt8(v) => v.len(),
            TensorData::Int32(v) => v.len(),
            TensorData::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data(&self) -> &TensorData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut TensorData {
        &mut self.data
    }

    pub fn as_int8(&self) -> Option<&[i8]> {
        match &self.data {
            TensorData::Int8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int8_mut(&mut self) -> Option<&mut [i8]> {
        match &mut self.data {
            TensorData::Int8(v) => Some(v),
            _ => None,
        }
    }
}

fn filled<T: Copy>(value: T, len: usize) -> Vec<T, TENSOR_CAPACITY> {
    let mut v = Vec::new();
    // len was checked against the capacity by the caller.
    let _ = v.resize(len, value);
    v
}
