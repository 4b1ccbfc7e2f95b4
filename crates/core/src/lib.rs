//! Core types and traits for seqread
//!
//! This crate defines the foundational types shared by every deserializer:
//! - ElementType / SampleLayout: numeric representation and shape of a stream
//! - StreamDescription: a resolved feature or label input stream
//! - TensorBuffer / TensorView: owned and borrowed typed payload buffers
//! - SequenceDescription / Timeline: the immutable id-addressable catalog
//! - LabelGenerator: one-hot label encoding, specialized once per element type
//! - ChunkPolicy: pin/unpin hooks for groups of sequences
//! - DataDeserializer: the contract a minibatch source consumes
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod error;
pub mod label;
pub mod sequence;
pub mod tensor;
pub mod traits;
pub mod types;

pub use chunk::{AlwaysResident, ChunkPolicy, PinnedChunks};
pub use error::{ReaderError, ReaderResult};
pub use label::{label_generator_for, LabelGenerator, TypedLabelGenerator};
pub use sequence::{SequenceData, SequenceDescription, SequencePair, Timeline};
pub use tensor::{Element, TensorBuffer, TensorView};
pub use traits::{DataDeserializer, EpochConfiguration};
pub use types::{ChunkId, ElementType, SampleLayout, SequenceId, StreamDescription, StreamRole};
