//! Typed payload buffers.
//!
//! `TensorBuffer` owns a dense buffer in one of the materializable element
//! types; `TensorView` borrows one. Conversion between numeric types is a
//! numeric cast, never a reinterpretation of bytes.

use crate::types::ElementType;

/// Numeric element that a payload can be materialized in.
pub trait Element: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Element type tag
    const ELEMENT_TYPE: ElementType;

    /// The value 1 in this representation
    const ONE: Self;

    /// Numeric cast from f64
    fn from_f64(value: f64) -> Self;

    /// Borrow a slice of this element type as a view
    fn view(data: &[Self]) -> TensorView<'_>;

    /// Wrap an owned vector as a buffer
    fn into_buffer(data: Vec<Self>) -> TensorBuffer;
}

impl Element for f32 {
    const ELEMENT_TYPE: ElementType = ElementType::Float32;
    const ONE: Self = 1.0;

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn view(data: &[Self]) -> TensorView<'_> {
        TensorView::F32(data)
    }

    fn into_buffer(data: Vec<Self>) -> TensorBuffer {
        TensorBuffer::F32(data)
    }
}

impl Element for f64 {
    const ELEMENT_TYPE: ElementType = ElementType::Float64;
    const ONE: Self = 1.0;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn view(data: &[Self]) -> TensorView<'_> {
        TensorView::F64(data)
    }

    fn into_buffer(data: Vec<Self>) -> TensorBuffer {
        TensorBuffer::F64(data)
    }
}

/// Owned dense buffer
#[derive(Debug, Clone, PartialEq)]
pub enum TensorBuffer {
    /// 32-bit float elements
    F32(Vec<f32>),
    /// 64-bit float elements
    F64(Vec<f64>),
}

impl TensorBuffer {
    /// Element type of this buffer
    pub fn element_type(&self) -> ElementType {
        match self {
            TensorBuffer::F32(_) => ElementType::Float32,
            TensorBuffer::F64(_) => ElementType::Float64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            TensorBuffer::F32(v) => v.len(),
            TensorBuffer::F64(v) => v.len(),
        }
    }

    /// Whether the buffer has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow as a view
    pub fn as_view(&self) -> TensorView<'_> {
        match self {
            TensorBuffer::F32(v) => TensorView::F32(v),
            TensorBuffer::F64(v) => TensorView::F64(v),
        }
    }
}

/// Borrowed dense buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TensorView<'a> {
    /// 32-bit float elements
    F32(&'a [f32]),
    /// 64-bit float elements
    F64(&'a [f64]),
}

impl<'a> TensorView<'a> {
    /// Element type of the viewed buffer
    pub fn element_type(&self) -> ElementType {
        match self {
            TensorView::F32(_) => ElementType::Float32,
            TensorView::F64(_) => ElementType::Float64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            TensorView::F32(v) => v.len(),
            TensorView::F64(v) => v.len(),
        }
    }

    /// Whether the view has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The f32 slice, if this is an f32 view
    pub fn as_f32(&self) -> Option<&'a [f32]> {
        match *self {
            TensorView::F32(v) => Some(v),
            TensorView::F64(_) => None,
        }
    }

    /// The f64 slice, if this is an f64 view
    pub fn as_f64(&self) -> Option<&'a [f64]> {
        match *self {
            TensorView::F64(v) => Some(v),
            TensorView::F32(_) => None,
        }
    }

    /// Copy into an owned buffer
    pub fn to_buffer(&self) -> TensorBuffer {
        match self {
            TensorView::F32(v) => TensorBuffer::F32(v.to_vec()),
            TensorView::F64(v) => TensorBuffer::F64(v.to_vec()),
        }
    }

    /// Copy every element widened to f64
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            TensorView::F32(v) => v.iter().map(|&x| x as f64).collect(),
            TensorView::F64(v) => v.to_vec(),
        }
    }
}
