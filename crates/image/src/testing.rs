//! Test support: synthetic decoding and fixture helpers.
//!
//! Not used by the reader itself; it is public so integration tests and
//! benchmarks of this crate and its dependents can share the fixtures.
//!
//! [`SyntheticDecoder`] produces deterministic pixels without touching the
//! filesystem, so deserializer behavior can be tested independently of image
//! files. Every pixel sample of a decoded locator equals
//! [`SyntheticDecoder::fill_value`] for that locator.

use crate::decode::{DecodedImage, ImageDecoder, PixelBuffer};
use seqread_core::{
    ElementType, ReaderError, ReaderResult, SampleLayout, StreamDescription, StreamRole,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Decoder that fabricates images of a fixed shape.
#[derive(Debug, Clone)]
pub struct SyntheticDecoder {
    width: usize,
    height: usize,
    channels: usize,
    failing: Vec<String>,
    decoded: Arc<AtomicUsize>,
}

impl SyntheticDecoder {
    /// Decoder producing `width x height x channels` u8 images
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        SyntheticDecoder {
            width,
            height,
            channels,
            failing: Vec::new(),
            decoded: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make decoding of `path` fail (builder pattern)
    pub fn failing_on(mut self, path: impl Into<String>) -> Self {
        self.failing.push(path.into());
        self
    }

    /// Sample value used for every pixel of `path`
    pub fn fill_value(path: &str) -> u8 {
        path.bytes().fold(0u8, |acc, b| acc.wrapping_mul(31).wrapping_add(b))
    }

    /// Shared counter of successful decodes; clones observe the same count
    pub fn decode_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.decoded)
    }
}

impl ImageDecoder for SyntheticDecoder {
    fn decode(&self, path: &str) -> ReaderResult<DecodedImage> {
        if self.failing.iter().any(|p| p == path) {
            return Err(ReaderError::decode(path, "synthetic decode failure"));
        }
        let samples = self.width * self.height * self.channels;
        let image = DecodedImage::new(
            path,
            self.width,
            self.height,
            self.channels,
            PixelBuffer::U8(vec![Self::fill_value(path); samples]),
        )?;
        self.decoded.fetch_add(1, Ordering::Relaxed);
        Ok(image)
    }
}

/// Write a manifest of `(path, class id)` rows into `dir` and return its path
pub fn write_manifest(dir: &Path, rows: &[(&str, usize)]) -> io::Result<PathBuf> {
    let content: String = rows
        .iter()
        .map(|(path, class_id)| format!("{}\t{}\n", path, class_id))
        .collect();
    write_raw_manifest(dir, &content)
}

/// Write manifest text verbatim into `dir` and return its path
pub fn write_raw_manifest(dir: &Path, content: &str) -> io::Result<PathBuf> {
    let path = dir.join("map.txt");
    fs::write(&path, content)?;
    Ok(path)
}

/// Feature (`4 x 4 x 3`) and label (`[label_dimension]`) stream descriptions
pub fn two_streams(
    feature_type: ElementType,
    label_type: ElementType,
    label_dimension: usize,
) -> Vec<StreamDescription> {
    vec![
        StreamDescription {
            id: 0,
            name: "features".to_string(),
            role: StreamRole::Feature,
            element_type: feature_type,
            layout: SampleLayout::whc(4, 4, 3),
        },
        StreamDescription {
            id: 1,
            name: "labels".to_string(),
            role: StreamRole::Label,
            element_type: label_type,
            layout: SampleLayout::vector(label_dimension),
        },
    ]
}
