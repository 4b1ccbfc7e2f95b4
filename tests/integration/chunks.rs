//! Chunk Tests
//!
//! Pin/unpin hooks observed through a file-backed deserializer.

use crate::common::*;

fn three_image_dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset.add_rgb("a.png", 1, 1, [10, 10, 10], 0);
    dataset.add_rgb("b.png", 1, 1, [20, 20, 20], 1);
    dataset.add_rgb("c.png", 1, 1, [30, 30, 30], 2);
    dataset
}

#[test]
fn default_residency_ignores_hooks() {
    let dataset = three_image_dataset();
    let mut deserializer = dataset.open(&dataset.config(SampleLayout::whc(1, 1, 3), 3));

    for chunk_id in 0..3 {
        assert!(deserializer.require_chunk(chunk_id));
    }
    for chunk_id in 0..3 {
        deserializer.release_chunk(chunk_id);
    }
    assert_eq!(deserializer.sequences_by_id(&[0, 1, 2]).unwrap().len(), 3);
}

#[test]
fn pinned_residency_follows_epoch_walk() {
    let dataset = three_image_dataset();
    let config = dataset
        .config(SampleLayout::whc(1, 1, 3), 3)
        .with_chunk_residency(ChunkResidency::Pinned);
    let mut deserializer = dataset.open(&config);

    for chunk_id in 0..deserializer.timeline().chunk_count() {
        assert!(deserializer.require_chunk(chunk_id));
        let ids: Vec<_> = deserializer.timeline().sequences_in_chunk(chunk_id).collect();
        let pairs = deserializer.sequences_by_id(&ids).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].feature.data.as_f32().unwrap()[0], 10.0 * (chunk_id + 1) as f32);
        deserializer.release_chunk(chunk_id);
    }

    assert!(matches!(
        deserializer.sequences_by_id(&[0]),
        Err(ReaderError::ChunkNotResident(0))
    ));
}

#[test]
fn single_chunk_covers_every_sequence() {
    let dataset = three_image_dataset();
    let config = dataset
        .config(SampleLayout::whc(1, 1, 3), 3)
        .with_chunking(ChunkGrouping::Single)
        .with_chunk_residency(ChunkResidency::Pinned);
    let mut deserializer = dataset.open(&config);

    assert_eq!(deserializer.timeline().chunk_count(), 1);
    assert!(deserializer.require_chunk(0));
    assert!(deserializer.require_chunk(0));
    deserializer.release_chunk(0);

    // Still pinned once
    assert_eq!(deserializer.sequences_by_id(&[2, 1, 0]).unwrap().len(), 3);

    deserializer.release_chunk(0);
    assert!(deserializer.sequences_by_id(&[1]).is_err());
}
