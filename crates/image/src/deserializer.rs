//! Image data deserializer
//!
//! Turns a manifest of `<image path>\t<class id>` rows into a [`Timeline`] at
//! construction, then materializes decoded image tensors and one-hot labels
//! for requested ids on demand.
//!
//! # Memory policy
//!
//! Feature buffers are batch-scoped: each call to `sequences_by_id` drops the
//! payloads of the previous call before decoding anything new, so peak memory
//! is one batch of decoded images regardless of how many batches have been
//! consumed. The label generator's single buffer is generator-scoped; each
//! pair gets a copy of it so labels within one batch stay distinct.

use crate::config::{
    resolve_inputs, ChunkGrouping, ChunkResidency, ImageReaderConfig, ResolvedInputs,
};
use crate::decode::{FileImageDecoder, ImageDecoder};
use crate::manifest::build_timeline;
use seqread_core::{
    label_generator_for, AlwaysResident, ChunkId, ChunkPolicy, DataDeserializer, ElementType,
    EpochConfiguration, LabelGenerator, PinnedChunks, ReaderError, ReaderResult, SampleLayout,
    SequenceData, SequenceId, SequencePair, StreamDescription, StreamRole, Timeline,
    TensorBuffer,
};
use std::path::Path;

/// Payloads materialized for one id of the current batch
#[derive(Debug)]
struct MaterializedSequence {
    id: SequenceId,
    feature: TensorBuffer,
    feature_layout: SampleLayout,
    label: TensorBuffer,
    number_of_samples: usize,
}

/// Deserializer for labeled image manifests
pub struct ImageDataDeserializer {
    inputs: Vec<StreamDescription>,
    feature_element_type: ElementType,
    label_layout: SampleLayout,
    label_generator: Box<dyn LabelGenerator>,
    timeline: Timeline,
    decoder: Box<dyn ImageDecoder>,
    chunks: Box<dyn ChunkPolicy>,
    current: Vec<MaterializedSequence>,
}

impl ImageDataDeserializer {
    /// Open a deserializer from configuration, decoding files from disk.
    ///
    /// # Errors
    ///
    /// Any configuration or manifest error; see [`ImageDataDeserializer::new`].
    pub fn open(config: &ImageReaderConfig) -> ReaderResult<Self> {
        let decoder = match &config.image_root {
            Some(root) => FileImageDecoder::with_root(root),
            None => FileImageDecoder::new(),
        };
        Self::with_decoder(config, Box::new(decoder))
    }

    /// Open a deserializer from configuration with a custom decoder.
    pub fn with_decoder(
        config: &ImageReaderConfig,
        decoder: Box<dyn ImageDecoder>,
    ) -> ReaderResult<Self> {
        let chunks: Box<dyn ChunkPolicy> = match config.chunk_residency {
            ChunkResidency::Always => Box::new(AlwaysResident),
            ChunkResidency::Pinned => Box::new(PinnedChunks::new()),
        };
        Self::new(
            &config.map_file,
            &config.streams(),
            config.chunking,
            decoder,
            chunks,
        )
    }

    /// Build a deserializer from pre-resolved streams.
    ///
    /// Selects the label generator for the label stream's element type, then
    /// reads the whole manifest into the timeline.
    ///
    /// # Errors
    ///
    /// - `StreamCount` / `MissingStream` unless the streams are exactly one
    ///   feature and one label stream
    /// - `UnsupportedElementType` for a stream that cannot be materialized
    /// - `InvalidConfig` for a zero label dimension
    /// - `ManifestOpen` and the manifest format errors
    pub fn new(
        map_path: &Path,
        streams: &[StreamDescription],
        grouping: ChunkGrouping,
        decoder: Box<dyn ImageDecoder>,
        chunks: Box<dyn ChunkPolicy>,
    ) -> ReaderResult<Self> {
        let inputs = resolve_inputs(streams)?;
        let label_dimension = inputs.label_dimension()?;
        let ResolvedInputs { feature, label } = inputs;

        if !feature.element_type.is_materializable() {
            return Err(ReaderError::UnsupportedElementType {
                role: StreamRole::Feature,
                element_type: feature.element_type,
            });
        }

        let label_generator = label_generator_for(label.element_type, label_dimension)?;
        let timeline = build_timeline(map_path, label_dimension, grouping)?;

        tracing::info!(
            target: "seqread::image",
            manifest = %map_path.display(),
            sequences = timeline.len(),
            feature_type = %feature.element_type,
            label_type = %label.element_type,
            label_dimension,
            "Opened image deserializer"
        );

        Ok(ImageDataDeserializer {
            feature_element_type: feature.element_type,
            label_layout: label.layout.clone(),
            inputs: vec![feature, label],
            label_generator,
            timeline,
            decoder,
            chunks,
            current: Vec::new(),
        })
    }

    /// Label dimensionality
    pub fn label_dimension(&self) -> usize {
        self.label_generator.dimension()
    }

    /// Number of sequences held from the last materialization
    pub fn retained_sequences(&self) -> usize {
        self.current.len()
    }

    fn materialize_one(&mut self, id: SequenceId) -> ReaderResult<MaterializedSequence> {
        let description = self.timeline.lookup(id)?;
        if !self.chunks.is_resident(description.chunk_id) {
            return Err(ReaderError::ChunkNotResident(description.chunk_id));
        }

        let image = self.decoder.decode(&description.path)?;
        let (feature, feature_layout) = image.into_tensor(self.feature_element_type)?;
        let number_of_samples = description.number_of_samples;
        let class_id = description.class_id;

        let label = self.label_generator.generate(class_id).to_buffer();

        Ok(MaterializedSequence {
            id,
            feature,
            feature_layout,
            label,
            number_of_samples,
        })
    }
}

impl DataDeserializer for ImageDataDeserializer {
    fn inputs(&self) -> &[StreamDescription] {
        &self.inputs
    }

    fn set_epoch_configuration(&mut self, config: &EpochConfiguration) {
        // Epoch boundaries do not change how sequences are materialized.
        tracing::trace!(target: "seqread::image", epoch = config.index, "Epoch configuration ignored");
    }

    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn sequences_by_id(&mut self, ids: &[SequenceId]) -> ReaderResult<Vec<SequencePair<'_>>> {
        if ids.is_empty() {
            return Err(ReaderError::EmptyBatch);
        }

        // Remove the previous batch before decoding the next one
        self.current.clear();

        let mut batch = Vec::with_capacity(ids.len());
        for &id in ids {
            batch.push(self.materialize_one(id)?);
        }
        self.current = batch;

        tracing::trace!(target: "seqread::image", sequences = ids.len(), "Materialized batch");

        let label_layout = &self.label_layout;
        Ok(self
            .current
            .iter()
            .map(|sequence| SequencePair {
                id: sequence.id,
                feature: SequenceData {
                    data: sequence.feature.as_view(),
                    layout: &sequence.feature_layout,
                    number_of_samples: sequence.number_of_samples,
                },
                label: SequenceData {
                    data: sequence.label.as_view(),
                    layout: label_layout,
                    number_of_samples: sequence.number_of_samples,
                },
            })
            .collect())
    }

    fn require_chunk(&mut self, chunk_id: ChunkId) -> bool {
        self.chunks.require(chunk_id)
    }

    fn release_chunk(&mut self, chunk_id: ChunkId) {
        self.chunks.release(chunk_id)
    }
}

impl std::fmt::Debug for ImageDataDeserializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageDataDeserializer")
            .field("inputs", &self.inputs)
            .field("sequences", &self.timeline.len())
            .field("label_dimension", &self.label_generator.dimension())
            .field("retained_sequences", &self.current.len())
            .finish()
    }
}
