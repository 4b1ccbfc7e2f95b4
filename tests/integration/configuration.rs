//! Configuration Tests
//!
//! Loading reader.toml from disk and opening a deserializer from it.

use crate::common::*;

#[test]
fn hand_written_toml_opens_dataset() {
    let mut dataset = Dataset::new();
    dataset.add_rgb("cat.png", 2, 2, [1, 1, 1], 1);
    dataset.add_rgb("dog.png", 2, 2, [2, 2, 2], 0);
    dataset.write_manifest();

    let toml = r#"
map_file = "map.txt"
image_root = "images"

[[input]]
name = "labels"
role = "label"
element_type = "double"
layout = [2]

[[input]]
name = "features"
role = "feature"
element_type = "float"
layout = [2, 2, 3]
"#;
    std::fs::write(dataset.config_path(), toml).unwrap();

    let config = ImageReaderConfig::from_file(&dataset.config_path()).unwrap();
    assert_eq!(config.map_file, dataset.map_path());
    assert_eq!(config.image_root, Some(dataset.images_dir()));

    let mut deserializer = ImageDataDeserializer::open(&config).unwrap();
    let inputs = deserializer.inputs();
    assert_eq!(inputs[0].name, "features");
    assert_eq!(inputs[1].name, "labels");
    assert_eq!(inputs[1].element_type, ElementType::Float64);

    let pairs = deserializer.sequences_by_id(&[0, 1]).unwrap();
    assert_eq!(pairs[0].label.data.as_f64().unwrap(), &[0.0, 1.0]);
    assert_eq!(pairs[1].label.data.as_f64().unwrap(), &[1.0, 0.0]);
}

#[test]
fn written_config_round_trips() {
    let dataset = Dataset::new();
    let config = dataset
        .config(SampleLayout::whc(8, 8, 3), 10)
        .with_chunking(ChunkGrouping::Single)
        .with_chunk_residency(ChunkResidency::Pinned);
    config.write_to_file(&dataset.config_path()).unwrap();

    let text = read_to_string(&dataset.config_path());
    assert!(text.contains("chunking = \"single\""));
    assert!(text.contains("chunk_residency = \"pinned\""));

    let loaded = ImageReaderConfig::from_file(&dataset.config_path()).unwrap();
    assert_eq!(loaded.inputs, config.inputs);
    assert_eq!(loaded.chunking, ChunkGrouping::Single);
    assert_eq!(loaded.chunk_residency, ChunkResidency::Pinned);
}

#[test]
fn three_inputs_are_rejected_when_loading() {
    let dataset = Dataset::new();
    let toml = format!(
        "{}\n[[input]]\nname = \"extra\"\nrole = \"label\"\nelement_type = \"float32\"\nlayout = [3]\n",
        ImageReaderConfig::default_toml()
    );
    std::fs::write(dataset.config_path(), toml).unwrap();

    let err = ImageReaderConfig::from_file(&dataset.config_path()).unwrap_err();
    assert!(matches!(err, ReaderError::StreamCount(3)));
}

#[test]
fn missing_manifest_fails_open() {
    let dataset = Dataset::new();
    let config = dataset.config(SampleLayout::whc(1, 1, 3), 2);
    config.write_to_file(&dataset.config_path()).unwrap();

    let loaded = ImageReaderConfig::from_file(&dataset.config_path()).unwrap();
    let err = ImageDataDeserializer::open(&loaded).unwrap_err();
    assert!(matches!(err, ReaderError::ManifestOpen { .. }));
    assert!(err.to_string().starts_with("Could not open"));
}

#[test]
fn malformed_manifest_reports_line() {
    let dataset = Dataset::new();
    std::fs::write(dataset.map_path(), "a.png\t0\nb.png\t1\nc.png 2\n").unwrap();
    let config = dataset.config(SampleLayout::whc(1, 1, 3), 3);
    config.write_to_file(&dataset.config_path()).unwrap();

    let loaded = ImageReaderConfig::from_file(&dataset.config_path()).unwrap();
    let err = ImageDataDeserializer::open(&loaded).unwrap_err();
    assert!(err.is_manifest_format());
    assert!(err.to_string().contains("line: 2"));
}
