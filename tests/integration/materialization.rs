//! Materialization Tests
//!
//! Decoded pixels and one-hot labels produced from PNG files.

use crate::common::*;

// ============================================================================
// Labels
// ============================================================================

#[test]
fn labels_follow_manifest_class_ids() {
    let mut dataset = Dataset::new();
    dataset.add_rgb("img0.png", 2, 2, [255, 0, 0], 0);
    dataset.add_rgb("img1.png", 2, 2, [0, 0, 255], 2);
    let mut deserializer = dataset.open(&dataset.config(SampleLayout::whc(2, 2, 3), 3));

    assert_eq!(deserializer.timeline_length(), 2);

    let pairs = deserializer.sequences_by_id(&[0, 1]).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_one_hot(pairs[0].label.data.as_f32().unwrap(), 0);
    assert_one_hot(pairs[1].label.data.as_f32().unwrap(), 2);
    for pair in &pairs {
        assert_eq!(pair.feature.number_of_samples, 1);
        assert_eq!(pair.label.number_of_samples, 1);
    }
}

#[test]
fn labels_stay_distinct_across_batches() {
    let mut dataset = Dataset::new();
    for class_id in 0..5 {
        dataset.add_rgb(&format!("img{}.png", class_id), 1, 1, [0, 0, 0], 4 - class_id);
    }
    let mut deserializer = dataset.open(&dataset.config(SampleLayout::whc(1, 1, 3), 5));

    for batch in [[0, 1], [2, 3], [4, 0]] {
        let pairs = deserializer.sequences_by_id(&batch).unwrap();
        for pair in &pairs {
            assert_one_hot(pair.label.data.as_f32().unwrap(), 4 - pair.id);
        }
    }
}

// ============================================================================
// Features
// ============================================================================

#[test]
fn rgb_pixels_are_interleaved_without_normalization() {
    let mut dataset = Dataset::new();
    dataset.add_rgb("red.png", 3, 2, [200, 10, 0], 0);
    let mut deserializer = dataset.open(&dataset.config(SampleLayout::whc(3, 2, 3), 2));

    let pairs = deserializer.sequences_by_id(&[0]).unwrap();
    let feature = &pairs[0].feature;
    assert_eq!(feature.layout, &SampleLayout::whc(3, 2, 3));

    let pixels = feature.data.as_f32().unwrap();
    assert_eq!(pixels.len(), 18);
    for pixel in pixels.chunks(3) {
        assert_eq!(pixel, &[200.0f32, 10.0, 0.0]);
    }
}

#[test]
fn grayscale_keeps_single_channel_row_major() {
    let mut dataset = Dataset::new();
    dataset.add_gradient("gray.png", 4, 2, 1);
    let mut deserializer = dataset.open(&dataset.config(SampleLayout::whc(4, 2, 1), 2));

    let pairs = deserializer.sequences_by_id(&[0]).unwrap();
    assert_eq!(pairs[0].feature.layout, &SampleLayout::whc(4, 2, 1));
    assert_eq!(
        pairs[0].feature.data.as_f32().unwrap(),
        &[0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
    );
}

#[test]
fn double_features_are_cast_from_bytes() {
    let mut dataset = Dataset::new();
    dataset.add_rgb("a.png", 1, 1, [1, 2, 3], 0);
    let mut config = dataset.config(SampleLayout::whc(1, 1, 3), 1);
    config.inputs[0].element_type = ElementType::Float64;
    let mut deserializer = dataset.open(&config);

    let pairs = deserializer.sequences_by_id(&[0]).unwrap();
    assert_eq!(pairs[0].feature.data.as_f64().unwrap(), &[1.0, 2.0, 3.0]);
    assert_eq!(pairs[0].label.data.element_type(), ElementType::Float32);
}

#[test]
fn image_size_comes_from_the_file() {
    let mut dataset = Dataset::new();
    dataset.add_rgb("small.png", 2, 2, [9, 9, 9], 0);
    dataset.add_rgb("wide.png", 5, 1, [9, 9, 9], 1);
    let mut deserializer = dataset.open(&dataset.config(SampleLayout::whc(2, 2, 3), 2));

    let pairs = deserializer.sequences_by_id(&[0, 1]).unwrap();
    assert_eq!(pairs[0].feature.layout, &SampleLayout::whc(2, 2, 3));
    assert_eq!(pairs[1].feature.layout, &SampleLayout::whc(5, 1, 3));
    assert_eq!(pairs[1].feature.data.len(), 15);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn corrupt_image_fails_the_whole_batch() {
    let mut dataset = Dataset::new();
    dataset.add_rgb("good.png", 1, 1, [0, 0, 0], 0);
    dataset.add_corrupt("bad.png", 1);
    let mut deserializer = dataset.open(&dataset.config(SampleLayout::whc(1, 1, 3), 2));

    let err = deserializer.sequences_by_id(&[0, 1]).unwrap_err();
    assert!(matches!(err, ReaderError::Decode { .. }));
    assert!(err.to_string().contains("bad.png"));

    assert_eq!(deserializer.sequences_by_id(&[0]).unwrap().len(), 1);
}

#[test]
fn missing_image_is_a_decode_error_not_a_construction_error() {
    let dataset = Dataset::new();
    std::fs::write(dataset.map_path(), "ghost.png\t0\n").unwrap();
    let config = dataset.config(SampleLayout::whc(1, 1, 3), 1);
    config.write_to_file(&dataset.config_path()).unwrap();

    let loaded = ImageReaderConfig::from_file(&dataset.config_path()).unwrap();
    let mut deserializer = ImageDataDeserializer::open(&loaded).unwrap();
    assert_eq!(deserializer.timeline_length(), 1);
    assert!(matches!(
        deserializer.sequences_by_id(&[0]),
        Err(ReaderError::Decode { .. })
    ));
}
