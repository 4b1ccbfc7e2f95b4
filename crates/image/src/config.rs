//! Reader configuration via `reader.toml`
//!
//! The configuration names the manifest, declares the two input streams and
//! selects the chunk grouping and residency policies. Resolving the declared
//! inputs into one feature and one label stream is a separate step
//! ([`resolve_inputs`]) so callers with pre-resolved streams can skip TOML.

use seqread_core::{
    ElementType, ReaderError, ReaderResult, SampleLayout, StreamDescription, StreamRole,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name conventionally placed next to the manifest.
pub const CONFIG_FILE_NAME: &str = "reader.toml";

/// How manifest rows are grouped into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkGrouping {
    /// Each sequence is its own chunk (`chunk_id == id`)
    #[default]
    PerSequence,
    /// The whole dataset is chunk 0
    Single,
}

impl ChunkGrouping {
    /// Chunk id assigned to the sequence with this id
    pub fn chunk_for(&self, id: usize) -> usize {
        match self {
            ChunkGrouping::PerSequence => id,
            ChunkGrouping::Single => 0,
        }
    }
}

/// Which chunk policy the deserializer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkResidency {
    /// Hooks are no-ops; every chunk can be materialized
    #[default]
    Always,
    /// Only chunks pinned via `require_chunk` can be materialized
    Pinned,
}

/// One declared input stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Stream name
    pub name: String,
    /// `"feature"` or `"label"`
    pub role: StreamRole,
    /// `"float32"`, `"float64"` or `"float16"`
    pub element_type: ElementType,
    /// Axis extents of one sample
    pub layout: SampleLayout,
}

/// Reader configuration loaded from `reader.toml`.
///
/// # Example
///
/// ```toml
/// map_file = "train_map.txt"
/// chunking = "per-sequence"
/// chunk_residency = "always"
///
/// [[input]]
/// name = "features"
/// role = "feature"
/// element_type = "float32"
/// layout = [224, 224, 3]
///
/// [[input]]
/// name = "labels"
/// role = "label"
/// element_type = "float32"
/// layout = [1000]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReaderConfig {
    /// Manifest path
    pub map_file: PathBuf,
    /// Base directory for relative image locators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_root: Option<PathBuf>,
    /// Chunk grouping policy
    #[serde(default)]
    pub chunking: ChunkGrouping,
    /// Chunk residency policy
    #[serde(default)]
    pub chunk_residency: ChunkResidency,
    /// Declared input streams
    #[serde(default, rename = "input")]
    pub inputs: Vec<InputConfig>,
}

impl ImageReaderConfig {
    /// Create a config for a manifest with no inputs declared
    pub fn new(map_file: impl Into<PathBuf>) -> Self {
        ImageReaderConfig {
            map_file: map_file.into(),
            image_root: None,
            chunking: ChunkGrouping::default(),
            chunk_residency: ChunkResidency::default(),
            inputs: Vec::new(),
        }
    }

    /// Declare an input stream (builder pattern)
    pub fn with_input(
        mut self,
        name: impl Into<String>,
        role: StreamRole,
        element_type: ElementType,
        layout: SampleLayout,
    ) -> Self {
        self.inputs.push(InputConfig {
            name: name.into(),
            role,
            element_type,
            layout,
        });
        self
    }

    /// Set the image root (builder pattern)
    pub fn with_image_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.image_root = Some(root.into());
        self
    }

    /// Set the chunk grouping (builder pattern)
    pub fn with_chunking(mut self, chunking: ChunkGrouping) -> Self {
        self.chunking = chunking;
        self
    }

    /// Set the chunk residency (builder pattern)
    pub fn with_chunk_residency(mut self, residency: ChunkResidency) -> Self {
        self.chunk_residency = residency;
        self
    }

    /// Declared inputs as stream descriptions, in declaration order
    pub fn streams(&self) -> Vec<StreamDescription> {
        self.inputs
            .iter()
            .enumerate()
            .map(|(id, input)| StreamDescription {
                id,
                name: input.name.clone(),
                role: input.role,
                element_type: input.element_type,
                layout: input.layout.clone(),
            })
            .collect()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Fails if the manifest path is empty or the inputs do not resolve into
    /// one feature and one label stream.
    pub fn validate(&self) -> ReaderResult<()> {
        if self.map_file.as_os_str().is_empty() {
            return Err(ReaderError::invalid_config("map_file must not be empty"));
        }
        resolve_inputs(&self.streams())?.label_dimension()?;
        Ok(())
    }

    /// Parse config from a TOML string and validate it.
    pub fn from_toml_str(content: &str) -> ReaderResult<Self> {
        let config: ImageReaderConfig = toml::from_str(content)
            .map_err(|e| ReaderError::invalid_config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// A relative `map_file` or `image_root` is resolved against the
    /// directory containing the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> ReaderResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReaderError::invalid_config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            ReaderError::InvalidConfig(message) => ReaderError::invalid_config(format!(
                "{} ({})",
                message,
                path.display()
            )),
            other => other,
        })?;
        if let Some(dir) = path.parent() {
            if config.map_file.is_relative() {
                config.map_file = dir.join(&config.map_file);
            }
            if let Some(root) = config.image_root.as_mut() {
                if root.is_relative() {
                    *root = dir.join(&*root);
                }
            }
        }
        Ok(config)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> ReaderResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ReaderError::invalid_config(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns an example config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# seqread image reader configuration
#
# Manifest: one "<path>\t<classId>" row per image, no header.
map_file = "map.txt"

# Base directory for relative image paths (default: process working directory)
# image_root = "images"

# Chunk grouping: "per-sequence" (default, chunk id = sequence id) or "single"
chunking = "per-sequence"

# Chunk residency: "always" (default, pin/unpin are no-ops) or "pinned"
chunk_residency = "always"

[[input]]
name = "features"
role = "feature"
element_type = "float32"
layout = [32, 32, 3]

[[input]]
name = "labels"
role = "label"
element_type = "float32"
layout = [10]
"#
    }
}

/// Feature and label streams picked out of the declared inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    /// Feature stream
    pub feature: StreamDescription,
    /// Label stream
    pub label: StreamDescription,
}

impl ResolvedInputs {
    /// Label dimensionality: element count of the label layout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the element count overflows.
    pub fn label_dimension(&self) -> ReaderResult<usize> {
        self.label
            .layout
            .checked_num_elements()
            .ok_or_else(|| ReaderError::invalid_config("label layout element count overflows"))
    }
}

/// Resolve exactly one feature and one label stream.
///
/// # Errors
///
/// Returns `StreamCount` unless exactly two streams are given and
/// `MissingStream` if either role is absent.
pub fn resolve_inputs(streams: &[StreamDescription]) -> ReaderResult<ResolvedInputs> {
    if streams.len() != 2 {
        return Err(ReaderError::StreamCount(streams.len()));
    }
    let find = |role: StreamRole| {
        streams
            .iter()
            .find(|s| s.role == role)
            .cloned()
            .ok_or(ReaderError::MissingStream(role))
    };
    Ok(ResolvedInputs {
        feature: find(StreamRole::Feature)?,
        label: find(StreamRole::Label)?,
    })
}
