//! One-hot label encoding.
//!
//! The concrete element type is chosen once, when the deserializer is built,
//! by [`label_generator_for`]. After that every call goes through the
//! [`LabelGenerator`] trait without further type dispatch.
//!
//! Each generator owns a single output buffer of `dimension` elements that is
//! overwritten on every call. `generate` borrows the generator mutably, so the
//! returned view cannot outlive the next call.

use crate::error::{ReaderError, ReaderResult};
use crate::tensor::{Element, TensorView};
use crate::types::{ElementType, StreamRole};

/// Produces one-hot label buffers for class ids.
///
/// Not meant to be shared between threads; use one generator per worker.
pub trait LabelGenerator: Send {
    /// Element type of generated buffers
    fn element_type(&self) -> ElementType;

    /// Length of generated buffers
    fn dimension(&self) -> usize;

    /// Encode `class_id` into the internal buffer and borrow it.
    ///
    /// # Panics
    ///
    /// Panics if `class_id >= self.dimension()`. Timeline construction rejects
    /// such class ids before they can reach a generator.
    fn generate(&mut self, class_id: usize) -> TensorView<'_>;
}

/// Label generator specialized for one element type
#[derive(Debug, Clone)]
pub struct TypedLabelGenerator<T: Element> {
    data: Vec<T>,
}

impl<T: Element> TypedLabelGenerator<T> {
    /// Create a generator for `dimension` classes
    pub fn new(dimension: usize) -> Self {
        TypedLabelGenerator {
            data: vec![T::default(); dimension],
        }
    }
}

impl<T: Element> LabelGenerator for TypedLabelGenerator<T> {
    fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    fn dimension(&self) -> usize {
        self.data.len()
    }

    fn generate(&mut self, class_id: usize) -> TensorView<'_> {
        self.data.fill(T::default());
        self.data[class_id] = T::ONE;
        T::view(&self.data)
    }
}

/// Select the generator for a label stream's element type.
///
/// # Errors
///
/// Returns `UnsupportedElementType` for element types that cannot be
/// materialized and `InvalidConfig` for a zero dimension.
pub fn label_generator_for(
    element_type: ElementType,
    dimension: usize,
) -> ReaderResult<Box<dyn LabelGenerator>> {
    if dimension == 0 {
        return Err(ReaderError::invalid_config(
            "label dimension must be greater than 0",
        ));
    }
    match element_type {
        ElementType::Float32 => Ok(Box::new(TypedLabelGenerator::<f32>::new(dimension))),
        ElementType::Float64 => Ok(Box::new(TypedLabelGenerator::<f64>::new(dimension))),
        other => Err(ReaderError::UnsupportedElementType {
            role: StreamRole::Label,
            element_type: other,
        }),
    }
}
