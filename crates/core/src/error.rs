//! Error types for seqread
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Errors fall into four groups:
//! - Configuration: wrong stream count, unsupported element type, bad config
//! - Format: a manifest row that does not have exactly two fields
//! - Invariant: class id out of range, sequence id out of range, empty batch
//! - Decode: a payload source that cannot be turned into pixels
//!
//! None of them are retried; all propagate to the caller of the operation
//! that detected them.

use crate::types::{ChunkId, ElementType, SequenceId, StreamRole};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for seqread operations
pub type ReaderResult<T> = std::result::Result<T, ReaderError>;

/// Error types for seqread
#[derive(Debug, Error)]
pub enum ReaderError {
    /// I/O error while reading a file that was already open
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Manifest file could not be opened
    #[error("Could not open {} for reading: {source}", .path.display())]
    ManifestOpen {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Manifest row does not split into exactly two tab-delimited fields
    #[error(
        "Invalid map file format, must contain 2 tab-delimited columns: {}, line: {line} (found {fields})",
        .path.display()
    )]
    InvalidManifestLine {
        /// Manifest path
        path: PathBuf,
        /// 0-based line number
        line: usize,
        /// Number of fields found on the line
        fields: usize,
    },

    /// Manifest row has an empty path column
    #[error("Invalid map file format, empty image path: {}, line: {line}", .path.display())]
    EmptyManifestPath {
        /// Manifest path
        path: PathBuf,
        /// 0-based line number
        line: usize,
    },

    /// Class id column is not a base-10 non-negative integer
    #[error("Invalid class id '{value}': {}, line: {line}", .path.display())]
    InvalidClassId {
        /// Manifest path
        path: PathBuf,
        /// 0-based line number
        line: usize,
        /// Text of the class id column
        value: String,
    },

    /// Class id is not below the label dimension
    #[error(
        "Class id {class_id} exceeds label dimension {label_dimension}: {}, line: {line}",
        .path.display()
    )]
    ClassIdOutOfRange {
        /// Manifest path
        path: PathBuf,
        /// 0-based line number
        line: usize,
        /// Offending class id
        class_id: usize,
        /// Configured label dimension
        label_dimension: usize,
    },

    /// Deserializer needs exactly one feature and one label stream
    #[error("Expected exactly 2 input streams (feature and label), got {0}")]
    StreamCount(usize),

    /// A stream role was not declared
    #[error("No {0} input stream declared")]
    MissingStream(StreamRole),

    /// Element type cannot be produced for this stream
    #[error("Unsupported {role} element type: {element_type}")]
    UnsupportedElementType {
        /// Stream role
        role: StreamRole,
        /// Declared element type
        element_type: ElementType,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sequence id is not in the timeline
    #[error("Sequence id {id} out of range (timeline length {len})")]
    SequenceOutOfRange {
        /// Requested id
        id: SequenceId,
        /// Timeline length
        len: usize,
    },

    /// Materialization requested with no ids
    #[error("Requested sequence batch is empty")]
    EmptyBatch,

    /// Sequence belongs to a chunk that is not pinned
    #[error("Chunk {0} is not resident")]
    ChunkNotResident(ChunkId),

    /// Payload source could not be decoded
    #[error("Failed to decode {path}: {reason}")]
    Decode {
        /// Source locator
        path: String,
        /// Decoder message
        reason: String,
    },
}

impl ReaderError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ReaderError::InvalidConfig(message.into())
    }

    /// Create a decode error for a source locator
    pub fn decode(path: impl Into<String>, reason: impl ToString) -> Self {
        ReaderError::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error was raised while constructing a deserializer
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ReaderError::ManifestOpen { .. }
                | ReaderError::StreamCount(_)
                | ReaderError::MissingStream(_)
                | ReaderError::UnsupportedElementType { .. }
                | ReaderError::InvalidConfig(_)
        )
    }

    /// Whether this error was caused by manifest content
    pub fn is_manifest_format(&self) -> bool {
        matches!(
            self,
            ReaderError::InvalidManifestLine { .. }
                | ReaderError::EmptyManifestPath { .. }
                | ReaderError::InvalidClassId { .. }
                | ReaderError::ClassIdOutOfRange { .. }
        )
    }
}
