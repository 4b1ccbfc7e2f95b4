//! Sequence catalog and materialized payload views.
//!
//! A [`Timeline`] is built once from a manifest and never mutated afterwards,
//! so shared read-only access from several threads is safe. Callers hold ids
//! or borrowed references into it, never ownership of its descriptions.

use crate::error::{ReaderError, ReaderResult};
use crate::tensor::TensorView;
use crate::types::{ChunkId, SampleLayout, SequenceId};
use std::ops::Index;

/// One manifest row resolved into an addressable sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDescription {
    /// Dense zero-based id, equal to the manifest line index
    pub id: SequenceId,
    /// Logical caching group
    pub chunk_id: ChunkId,
    /// Source locator of the feature payload
    pub path: String,
    /// Class id, always below the label dimension
    pub class_id: usize,
    /// Samples represented by this sequence (1 for a still image)
    pub number_of_samples: usize,
    /// False when the source is known to be unusable
    pub is_valid: bool,
}

impl SequenceDescription {
    /// Create a valid single-sample description
    pub fn new(id: SequenceId, chunk_id: ChunkId, path: impl Into<String>, class_id: usize) -> Self {
        SequenceDescription {
            id,
            chunk_id,
            path: path.into(),
            class_id,
            number_of_samples: 1,
            is_valid: true,
        }
    }
}

/// Immutable, ordered catalog of sequence descriptions.
///
/// Index `i` always holds the description with `id == i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    sequences: Vec<SequenceDescription>,
}

impl Timeline {
    /// Build a timeline from descriptions in id order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a description's id does not match its
    /// position.
    pub fn new(sequences: Vec<SequenceDescription>) -> ReaderResult<Self> {
        if let Some((position, sequence)) = sequences
            .iter()
            .enumerate()
            .find(|(position, sequence)| sequence.id != *position)
        {
            return Err(ReaderError::invalid_config(format!(
                "sequence at position {} has id {}",
                position, sequence.id
            )));
        }
        Ok(Timeline { sequences })
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether the timeline holds no sequences
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Look up a description by id
    pub fn get(&self, id: SequenceId) -> Option<&SequenceDescription> {
        self.sequences.get(id)
    }

    /// Look up a description by id, failing for ids past the end
    pub fn lookup(&self, id: SequenceId) -> ReaderResult<&SequenceDescription> {
        self.sequences
            .get(id)
            .ok_or(ReaderError::SequenceOutOfRange {
                id,
                len: self.sequences.len(),
            })
    }

    /// Iterate descriptions in id order
    pub fn iter(&self) -> std::slice::Iter<'_, SequenceDescription> {
        self.sequences.iter()
    }

    /// All descriptions as a slice
    pub fn as_slice(&self) -> &[SequenceDescription] {
        &self.sequences
    }

    /// Ids of the sequences that belong to a chunk
    pub fn sequences_in_chunk(&self, chunk_id: ChunkId) -> impl Iterator<Item = SequenceId> + '_ {
        self.sequences
            .iter()
            .filter(move |s| s.chunk_id == chunk_id)
            .map(|s| s.id)
    }

    /// Number of distinct chunk ids
    pub fn chunk_count(&self) -> usize {
        let mut chunks: Vec<ChunkId> = self.sequences.iter().map(|s| s.chunk_id).collect();
        chunks.sort_unstable();
        chunks.dedup();
        chunks.len()
    }

    /// Sum of `number_of_samples` over valid sequences
    pub fn total_samples(&self) -> usize {
        self.sequences
            .iter()
            .filter(|s| s.is_valid)
            .map(|s| s.number_of_samples)
            .sum()
    }
}

impl Index<SequenceId> for Timeline {
    type Output = SequenceDescription;

    fn index(&self, id: SequenceId) -> &SequenceDescription {
        &self.sequences[id]
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a SequenceDescription;
    type IntoIter = std::slice::Iter<'a, SequenceDescription>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}

/// One stream's payload for one sequence.
///
/// Borrowed from the deserializer; valid until its next materialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceData<'a> {
    /// Dense payload buffer
    pub data: TensorView<'a>,
    /// Shape of one sample
    pub layout: &'a SampleLayout,
    /// Samples in this sequence
    pub number_of_samples: usize,
}

/// Feature and label payloads for one requested id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencePair<'a> {
    /// Id this pair was materialized for
    pub id: SequenceId,
    /// Decoded feature payload
    pub feature: SequenceData<'a>,
    /// One-hot label payload
    pub label: SequenceData<'a>,
}
