//! seqread - Chunked sequence deserialization for labeled image datasets
//!
//! seqread turns a flat manifest of `<image path>\t<class id>` rows into an
//! id-addressable timeline of sequences and lazily materializes decoded image
//! tensors and one-hot labels for requested ids, keeping at most one batch of
//! decoded payloads alive.
//!
//! # Quick Start
//!
//! ```ignore
//! use seqread::{DataDeserializer, ImageDataDeserializer, ImageReaderConfig};
//!
//! let config = ImageReaderConfig::from_file(Path::new("reader.toml"))?;
//! let mut deserializer = ImageDataDeserializer::open(&config)?;
//!
//! let ids: Vec<usize> = (0..deserializer.timeline_length()).take(32).collect();
//! for pair in deserializer.sequences_by_id(&ids)? {
//!     let pixels = pair.feature.data;
//!     let label = pair.label.data;
//! }
//! ```
//!
//! # Architecture
//!
//! Shared types and the [`DataDeserializer`] contract live in `seqread-core`;
//! the manifest reader, decoder and [`ImageDataDeserializer`] live in
//! `seqread-image`. Both are re-exported here.

pub use seqread_core::*;
pub use seqread_image::*;
