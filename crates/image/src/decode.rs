//! Image decoding and element-type conversion.
//!
//! A decoder turns a source locator into pixels plus width, height and
//! channel count. Pixels are row-major with interleaved channels (channel
//! varies fastest). The deserializer then casts them to the feature stream's
//! element type with [`DecodedImage::into_tensor`].

use seqread_core::{
    Element, ElementType, ReaderError, ReaderResult, SampleLayout, StreamRole, TensorBuffer,
};
use std::path::{Path, PathBuf};

use image::DynamicImage;

/// Pixel buffer in the representation the decoder produced
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// 8-bit unsigned samples
    U8(Vec<u8>),
    /// 16-bit unsigned samples
    U16(Vec<u16>),
    /// 32-bit float samples
    F32(Vec<f32>),
}

impl PixelBuffer {
    /// Number of samples
    pub fn len(&self) -> usize {
        match self {
            PixelBuffer::U8(v) => v.len(),
            PixelBuffer::U16(v) => v.len(),
            PixelBuffer::F32(v) => v.len(),
        }
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cast<T: Element>(self) -> Vec<T> {
        match self {
            PixelBuffer::U8(v) => v.into_iter().map(|x| T::from_f64(x as f64)).collect(),
            PixelBuffer::U16(v) => v.into_iter().map(|x| T::from_f64(x as f64)).collect(),
            PixelBuffer::F32(v) => v.into_iter().map(|x| T::from_f64(x as f64)).collect(),
        }
    }
}

/// Result of decoding one source
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Channels per pixel
    pub channels: usize,
    /// Interleaved samples, `width * height * channels` of them
    pub pixels: PixelBuffer,
}

impl DecodedImage {
    /// Create a decoded image, checking the buffer size.
    ///
    /// # Errors
    ///
    /// Returns a decode error for `path` if the pixel count does not match
    /// the dimensions.
    pub fn new(
        path: &str,
        width: usize,
        height: usize,
        channels: usize,
        pixels: PixelBuffer,
    ) -> ReaderResult<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| {
                ReaderError::decode(
                    path,
                    format!(
                        "image dimensions {}x{}x{} overflow",
                        width, height, channels
                    ),
                )
            })?;
        if pixels.len() != expected {
            return Err(ReaderError::decode(
                path,
                format!(
                    "pixel buffer holds {} samples, expected {}x{}x{} = {}",
                    pixels.len(),
                    width,
                    height,
                    channels,
                    expected
                ),
            ));
        }
        Ok(DecodedImage {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Layout of this image: `[width, height, channels]`
    pub fn layout(&self) -> SampleLayout {
        SampleLayout::whc(self.width, self.height, self.channels)
    }

    /// Convert into a buffer of `element_type` together with its layout.
    ///
    /// An f32 buffer requested as f32 is moved without conversion; every
    /// other combination is a numeric cast.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedElementType` for element types that cannot be
    /// materialized.
    pub fn into_tensor(self, element_type: ElementType) -> ReaderResult<(TensorBuffer, SampleLayout)> {
        let layout = self.layout();
        let buffer = match (element_type, self.pixels) {
            (ElementType::Float32, PixelBuffer::F32(v)) => TensorBuffer::F32(v),
            (ElementType::Float32, pixels) => f32::into_buffer(pixels.cast()),
            (ElementType::Float64, pixels) => f64::into_buffer(pixels.cast()),
            (other, _) => {
                return Err(ReaderError::UnsupportedElementType {
                    role: StreamRole::Feature,
                    element_type: other,
                })
            }
        };
        Ok((buffer, layout))
    }

    /// Build from an `image` crate image, keeping its channel count.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let (channels, pixels) = match image {
            DynamicImage::ImageLuma8(buf) => (1, PixelBuffer::U8(buf.into_raw())),
            DynamicImage::ImageLumaA8(buf) => (2, PixelBuffer::U8(buf.into_raw())),
            DynamicImage::ImageRgb8(buf) => (3, PixelBuffer::U8(buf.into_raw())),
            DynamicImage::ImageRgba8(buf) => (4, PixelBuffer::U8(buf.into_raw())),
            DynamicImage::ImageLuma16(buf) => (1, PixelBuffer::U16(buf.into_raw())),
            DynamicImage::ImageLumaA16(buf) => (2, PixelBuffer::U16(buf.into_raw())),
            DynamicImage::ImageRgb16(buf) => (3, PixelBuffer::U16(buf.into_raw())),
            DynamicImage::ImageRgba16(buf) => (4, PixelBuffer::U16(buf.into_raw())),
            DynamicImage::ImageRgb32F(buf) => (3, PixelBuffer::F32(buf.into_raw())),
            DynamicImage::ImageRgba32F(buf) => (4, PixelBuffer::F32(buf.into_raw())),
            other => (4, PixelBuffer::U8(other.to_rgba8().into_raw())),
        };
        DecodedImage {
            width,
            height,
            channels,
            pixels,
        }
    }
}

/// Turns a source locator into pixels.
///
/// Decoders must be `Send` so a deserializer can be moved to a worker thread.
pub trait ImageDecoder: Send {
    /// Decode the payload at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `Decode` error if the source is unreadable or corrupt.
    fn decode(&self, path: &str) -> ReaderResult<DecodedImage>;
}

/// Decoder backed by the `image` crate, reading files from disk.
#[derive(Debug, Clone, Default)]
pub struct FileImageDecoder {
    root: Option<PathBuf>,
}

impl FileImageDecoder {
    /// Decoder that opens locators as given
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder that resolves relative locators against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        FileImageDecoder {
            root: Some(root.into()),
        }
    }

    /// Path a locator resolves to
    pub fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        match &self.root {
            Some(root) if candidate.is_relative() => root.join(candidate),
            _ => candidate.to_path_buf(),
        }
    }
}

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, path: &str) -> ReaderResult<DecodedImage> {
        let resolved = self.resolve(path);
        let image = image::open(&resolved).map_err(|e| ReaderError::decode(path, e))?;
        Ok(DecodedImage::from_dynamic(image))
    }
}
