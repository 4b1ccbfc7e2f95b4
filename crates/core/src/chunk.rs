//! Chunk residency policies.
//!
//! `require`/`release` are advisory hints from the caller about which
//! chunks it will request soon and which it is done with. A policy decides
//! what "resident" means; the deserializer only asks [`ChunkPolicy::is_resident`]
//! before materializing a sequence.

use crate::types::ChunkId;
use rustc_hash::FxHashMap;

/// Pin/unpin hooks for groups of sequences
pub trait ChunkPolicy: Send {
    /// Pin a chunk. Returns false if the chunk cannot be made resident.
    fn require(&mut self, chunk_id: ChunkId) -> bool;

    /// Unpin a chunk
    fn release(&mut self, chunk_id: ChunkId);

    /// Whether sequences of this chunk may be materialized now
    fn is_resident(&self, chunk_id: ChunkId) -> bool;
}

/// Every chunk is always resident; both hooks are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysResident;

impl ChunkPolicy for AlwaysResident {
    fn require(&mut self, _chunk_id: ChunkId) -> bool {
        true
    }

    fn release(&mut self, _chunk_id: ChunkId) {}

    fn is_resident(&self, _chunk_id: ChunkId) -> bool {
        true
    }
}

/// Only pinned chunks are resident.
///
/// Pins are reference counted: a chunk stays resident until every `require`
/// has been matched by a `release`.
#[derive(Debug, Clone, Default)]
pub struct PinnedChunks {
    pins: FxHashMap<ChunkId, usize>,
}

impl PinnedChunks {
    /// Create a policy with nothing pinned
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct pinned chunks
    pub fn pinned_count(&self) -> usize {
        self.pins.len()
    }

    /// Outstanding pins for a chunk
    pub fn pin_count(&self, chunk_id: ChunkId) -> usize {
        self.pins.get(&chunk_id).copied().unwrap_or(0)
    }
}

impl ChunkPolicy for PinnedChunks {
    fn require(&mut self, chunk_id: ChunkId) -> bool {
        *self.pins.entry(chunk_id).or_insert(0) += 1;
        tracing::debug!(target: "seqread::chunk", chunk_id, pins = self.pin_count(chunk_id), "Pinned chunk");
        true
    }

    fn release(&mut self, chunk_id: ChunkId) {
        match self.pins.get_mut(&chunk_id) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.pins.remove(&chunk_id);
                tracing::debug!(target: "seqread::chunk", chunk_id, "Released chunk");
            }
            None => {
                tracing::warn!(target: "seqread::chunk", chunk_id, "Release of chunk that is not pinned");
            }
        }
    }

    fn is_resident(&self, chunk_id: ChunkId) -> bool {
        self.pins.contains_key(&chunk_id)
    }
}
