//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]

use image::{GrayImage, Luma, Rgb, RgbImage};
pub use seqread::{
    ChunkGrouping, ChunkResidency, DataDeserializer, ElementType, ImageDataDeserializer,
    ImageReaderConfig, ReaderError, SampleLayout, StreamRole, CONFIG_FILE_NAME,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Dataset - images, manifest and reader.toml in a temp directory
// ============================================================================

/// On-disk dataset fixture.
///
/// Layout:
/// ```text
/// <dir>/reader.toml
/// <dir>/map.txt
/// <dir>/images/<name>.png
/// ```
pub struct Dataset {
    pub dir: TempDir,
    rows: Vec<(String, usize)>,
}

impl Dataset {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        Dataset {
            dir,
            rows: Vec::new(),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.dir.path().join("images")
    }

    pub fn map_path(&self) -> PathBuf {
        self.dir.path().join("map.txt")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(CONFIG_FILE_NAME)
    }

    /// Add a solid-color RGB image and its manifest row.
    pub fn add_rgb(&mut self, name: &str, width: u32, height: u32, color: [u8; 3], class_id: usize) {
        let image = RgbImage::from_pixel(width, height, Rgb(color));
        image.save(self.images_dir().join(name)).unwrap();
        self.rows.push((name.to_string(), class_id));
    }

    /// Add a single-channel image whose pixel at (x, y) is `x + y * width`.
    pub fn add_gradient(&mut self, name: &str, width: u32, height: u32, class_id: usize) {
        let image = GrayImage::from_fn(width, height, |x, y| Luma([(x + y * width) as u8]));
        image.save(self.images_dir().join(name)).unwrap();
        self.rows.push((name.to_string(), class_id));
    }

    /// Add a manifest row whose file holds garbage bytes.
    pub fn add_corrupt(&mut self, name: &str, class_id: usize) {
        fs::write(self.images_dir().join(name), b"definitely not an image").unwrap();
        self.rows.push((name.to_string(), class_id));
    }

    /// Write the manifest for every row added so far.
    pub fn write_manifest(&self) -> PathBuf {
        let content: String = self
            .rows
            .iter()
            .map(|(name, class_id)| format!("{}\t{}\n", name, class_id))
            .collect();
        fs::write(self.map_path(), content).unwrap();
        self.map_path()
    }

    /// Config with relative paths, as a user would write it.
    pub fn config(&self, feature_layout: SampleLayout, label_dimension: usize) -> ImageReaderConfig {
        ImageReaderConfig::new("map.txt")
            .with_image_root("images")
            .with_input("features", StreamRole::Feature, ElementType::Float32, feature_layout)
            .with_input(
                "labels",
                StreamRole::Label,
                ElementType::Float32,
                SampleLayout::vector(label_dimension),
            )
    }

    /// Write manifest and config, then open through `reader.toml`.
    pub fn open(&self, config: &ImageReaderConfig) -> ImageDataDeserializer {
        self.write_manifest();
        config.write_to_file(&self.config_path()).unwrap();
        let loaded = ImageReaderConfig::from_file(&self.config_path()).unwrap();
        ImageDataDeserializer::open(&loaded).unwrap()
    }
}

/// Assert `label` is one-hot at `class_id`.
pub fn assert_one_hot(label: &[f32], class_id: usize) {
    for (i, &value) in label.iter().enumerate() {
        let expected = if i == class_id { 1.0 } else { 0.0 };
        assert_eq!(value, expected, "label[{}] of {:?}", i, label);
    }
}

pub fn read_to_string(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
