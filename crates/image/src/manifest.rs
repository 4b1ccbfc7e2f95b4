//! Manifest (map file) parsing
//!
//! # Format
//!
//! ```text
//! <path>\t<classId>\n
//! ```
//!
//! One row per sequence, no header. Each row must split into exactly two
//! tab-delimited fields; `classId` is a base-10 non-negative integer below the
//! label dimension. Any malformed row aborts the whole load with an error
//! naming the manifest path and the 0-based line number.

use crate::config::ChunkGrouping;
use seqread_core::{ReaderError, ReaderResult, SequenceDescription, Timeline};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Field delimiter of a manifest row
pub const FIELD_DELIMITER: char = '\t';

/// Build a timeline from the manifest at `map_path`.
///
/// # Errors
///
/// `ManifestOpen` if the file cannot be opened, `Io` if reading fails part
/// way, and the manifest format errors of [`parse_timeline`].
pub fn build_timeline(
    map_path: &Path,
    label_dimension: usize,
    grouping: ChunkGrouping,
) -> ReaderResult<Timeline> {
    let file = File::open(map_path).map_err(|source| ReaderError::ManifestOpen {
        path: map_path.to_path_buf(),
        source,
    })?;
    parse_timeline(BufReader::new(file), map_path, label_dimension, grouping)
}

/// Parse manifest rows from a reader.
///
/// `source` is only used to label errors.
///
/// # Errors
///
/// `InvalidManifestLine` for a row without exactly two fields,
/// `EmptyManifestPath` for a row with an empty path, `InvalidClassId` for a
/// class id that is not a non-negative integer, and `ClassIdOutOfRange` for
/// a class id not below `label_dimension`.
pub fn parse_timeline<R: BufRead>(
    reader: R,
    source: &Path,
    label_dimension: usize,
    grouping: ChunkGrouping,
) -> ReaderResult<Timeline> {
    let mut sequences = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() != 2 {
            return Err(ReaderError::InvalidManifestLine {
                path: source.to_path_buf(),
                line: line_number,
                fields: fields.len(),
            });
        }
        if fields[0].is_empty() {
            return Err(ReaderError::EmptyManifestPath {
                path: source.to_path_buf(),
                line: line_number,
            });
        }

        let class_text = fields[1].trim();
        let class_id: usize = class_text
            .parse()
            .map_err(|_| ReaderError::InvalidClassId {
                path: source.to_path_buf(),
                line: line_number,
                value: class_text.to_string(),
            })?;
        if class_id >= label_dimension {
            return Err(ReaderError::ClassIdOutOfRange {
                path: source.to_path_buf(),
                line: line_number,
                class_id,
                label_dimension,
            });
        }

        sequences.push(SequenceDescription::new(
            line_number,
            grouping.chunk_for(line_number),
            fields[0],
            class_id,
        ));
    }

    let timeline = Timeline::new(sequences)?;
    tracing::debug!(
        target: "seqread::manifest",
        path = %source.display(),
        sequences = timeline.len(),
        "Built timeline"
    );
    Ok(timeline)
}
