//! Core deserializer trait
//!
//! This module defines the contract between a deserializer and the minibatch
//! source that drives it. The source reads the timeline once to plan its
//! minibatches, then repeatedly materializes batches of ids, optionally
//! pinning and unpinning chunks in between.

use crate::error::ReaderResult;
use crate::sequence::{SequenceDescription, SequencePair, Timeline};
use crate::types::{ChunkId, SequenceId, StreamDescription};

/// Epoch parameters handed to a deserializer at each epoch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochConfiguration {
    /// Rank of this worker
    pub worker_rank: usize,
    /// Total number of workers
    pub number_of_workers: usize,
    /// Minibatch size in samples
    pub minibatch_size_in_samples: usize,
    /// Epoch size in samples
    pub total_size: usize,
    /// Zero-based epoch index
    pub index: usize,
}

impl Default for EpochConfiguration {
    fn default() -> Self {
        EpochConfiguration {
            worker_rank: 0,
            number_of_workers: 1,
            minibatch_size_in_samples: 0,
            total_size: 0,
            index: 0,
        }
    }
}

/// A source of id-addressable (feature, label) sequences.
///
/// Implementations are single-threaded: `sequences_by_id` and the chunk hooks
/// take `&mut self`. Shard id batches across independent instances for
/// parallel decoding.
pub trait DataDeserializer {
    /// Resolved input streams, feature first
    fn inputs(&self) -> &[StreamDescription];

    /// Apply epoch parameters
    fn set_epoch_configuration(&mut self, config: &EpochConfiguration);

    /// The immutable sequence catalog
    fn timeline(&self) -> &Timeline;

    /// Number of sequences in the timeline
    fn timeline_length(&self) -> usize {
        self.timeline().len()
    }

    /// Look up a sequence description by id
    ///
    /// # Errors
    ///
    /// Returns `SequenceOutOfRange` for ids at or past the timeline length.
    fn lookup(&self, id: SequenceId) -> ReaderResult<&SequenceDescription> {
        self.timeline().lookup(id)
    }

    /// Materialize one (feature, label) pair per id, in input order.
    ///
    /// Payloads returned by the previous call are discarded first, so at most
    /// one batch of decoded data is alive at a time. The returned views
    /// borrow `self` and are invalidated by the next call.
    ///
    /// # Errors
    ///
    /// Fails for an empty batch, an out-of-range id, a non-resident chunk, or
    /// an undecodable source. No partial batch is returned.
    fn sequences_by_id(&mut self, ids: &[SequenceId]) -> ReaderResult<Vec<SequencePair<'_>>>;

    /// Advise that a chunk will be requested soon
    fn require_chunk(&mut self, chunk_id: ChunkId) -> bool;

    /// Advise that a chunk is no longer needed
    fn release_chunk(&mut self, chunk_id: ChunkId);
}
