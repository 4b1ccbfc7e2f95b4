//! Image manifest deserializer for seqread
//!
//! This crate reads a tab-delimited manifest of image paths and class ids
//! into a timeline and materializes (image tensor, one-hot label) pairs on
//! demand:
//! - ImageReaderConfig: `reader.toml` configuration and input resolution
//! - manifest: manifest parsing into a Timeline
//! - ImageDecoder / FileImageDecoder: source locator to pixels
//! - ImageDataDeserializer: the DataDeserializer implementation
//! - testing: synthetic decoder and fixture helpers for tests and benchmarks
//!   (not used by the reader itself)
//!
//! # Usage
//!
//! ```ignore
//! use seqread_core::DataDeserializer;
//! use seqread_image::{ImageDataDeserializer, ImageReaderConfig};
//!
//! let config = ImageReaderConfig::from_file(Path::new("reader.toml"))?;
//! let mut deserializer = ImageDataDeserializer::open(&config)?;
//!
//! for pair in deserializer.sequences_by_id(&[0, 1])? {
//!     println!("{} -> {:?}", pair.id, pair.label.data);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod decode;
pub mod deserializer;
pub mod manifest;
pub mod testing;

pub use config::{
    resolve_inputs, ChunkGrouping, ChunkResidency, ImageReaderConfig, InputConfig,
    ResolvedInputs, CONFIG_FILE_NAME,
};
pub use decode::{DecodedImage, FileImageDecoder, ImageDecoder, PixelBuffer};
pub use deserializer::ImageDataDeserializer;
pub use manifest::{build_timeline, parse_timeline};
