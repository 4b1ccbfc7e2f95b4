//! Stream and shape types
//!
//! These are fixed at configuration time and never change after a
//! deserializer has been constructed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense, zero-based sequence identifier assigned in manifest read order.
pub type SequenceId = usize;

/// Caller-opaque grouping of sequences used for pin/unpin hints.
pub type ChunkId = usize;

/// Numeric representation of a tensor stream.
///
/// Selected once per stream from configuration. Drives which specialized
/// code path encodes labels and converts decoded pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 32-bit floating point
    #[serde(alias = "float")]
    Float32,
    /// 64-bit floating point
    #[serde(alias = "double")]
    Float64,
    /// 16-bit floating point (declarable, not materializable)
    #[serde(alias = "half")]
    Float16,
}

impl ElementType {
    /// Size of one element in bytes
    pub fn size_in_bytes(&self) -> usize {
        match self {
            ElementType::Float32 => 4,
            ElementType::Float64 => 8,
            ElementType::Float16 => 2,
        }
    }

    /// Configuration name of this element type
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
            ElementType::Float16 => "float16",
        }
    }

    /// Whether payloads of this type can be produced
    pub fn is_materializable(&self) -> bool {
        matches!(self, ElementType::Float32 | ElementType::Float64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered axis extents describing one sample's tensor.
///
/// Images use `[width, height, channels]`; labels use `[dimension]` (or any
/// shape whose element count is the label dimension).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleLayout {
    dims: Vec<usize>,
}

impl SampleLayout {
    /// Create a layout from axis extents
    pub fn new(dims: Vec<usize>) -> Self {
        SampleLayout { dims }
    }

    /// Image layout: width x height x channels
    pub fn whc(width: usize, height: usize, channels: usize) -> Self {
        SampleLayout {
            dims: vec![width, height, channels],
        }
    }

    /// One-dimensional layout of `len` elements
    pub fn vector(len: usize) -> Self {
        SampleLayout { dims: vec![len] }
    }

    /// Axis extents
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of extents, 0 for an empty layout).
    ///
    /// Saturates at `usize::MAX`; use [`SampleLayout::checked_num_elements`]
    /// for layouts read from configuration.
    pub fn num_elements(&self) -> usize {
        self.checked_num_elements().unwrap_or(usize::MAX)
    }

    /// Total number of elements, or `None` if the product overflows
    pub fn checked_num_elements(&self) -> Option<usize> {
        if self.dims.is_empty() {
            return Some(0);
        }
        self.dims
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
    }
}

impl fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.dims.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", parts.join(" x "))
    }
}

/// Role of an input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamRole {
    /// Decoded feature payload (pixels)
    Feature,
    /// One-hot encoded label payload
    Label,
}

impl fmt::Display for StreamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamRole::Feature => f.write_str("feature"),
            StreamRole::Label => f.write_str("label"),
        }
    }
}

/// A resolved input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescription {
    /// Index of the stream in declaration order
    pub id: usize,
    /// Stream name
    pub name: String,
    /// Feature or label
    pub role: StreamRole,
    /// Numeric representation
    pub element_type: ElementType,
    /// Shape of one sample
    pub layout: SampleLayout,
}
