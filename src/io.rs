use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Category, RECORD_DIR, RECORD_EXTENSION, XML_DIR};
use crate::conversion::build_example;
use crate::record::RecordWriter;
use crate::utils::{create_output_directory, create_progress_bar};

/// Enumerate the annotation files for one category.
///
/// Returns file names in filesystem enumeration order; a missing category
/// directory is an error.
pub fn list_annotations(data_dir: &Path, category: Category) -> Result<Vec<String>> {
    let dir = data_dir.join(XML_DIR).join(category.dir_name());
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("failed to list annotation directory {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        if entry.file_type()?.is_file() {
            let name = entry.file_name();
            let name = name.to_str().ok_or_else(|| {
                anyhow!("non-UTF-8 file name {:?} in {}", name, dir.display())
            })?;
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Set up the record output directory for one category
pub fn setup_output_directory(data_dir: &Path, category: Category) -> Result<PathBuf> {
    let dir = data_dir.join(RECORD_DIR).join(category.dir_name());
    create_output_directory(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

/// Name of the record file for a split and shard index, e.g.
/// `train.record-0000-00010`.
pub fn record_file_name(split: &str, index: usize) -> String {
    format!("{split}{RECORD_EXTENSION}{index}-00010")
}

/// Build and serialize every example of one shard into a single record file.
///
/// The destination file is created even when the shard is empty. Any failure
/// to build or write an example aborts the shard, leaving the file truncated.
pub fn write_record_file(
    examples: &[String],
    split: &str,
    index: usize,
    category: Category,
    data_dir: &Path,
    output_dir: &Path,
    label_map: &HashMap<String, i64>,
) -> Result<()> {
    let path = output_dir.join(record_file_name(split, index));
    let mut writer = RecordWriter::create(&path)
        .with_context(|| format!("failed to create record file {}", path.display()))?;

    let pb = create_progress_bar(examples.len() as u64, &format!("{category}/{split}-{index}"));
    for xml_name in examples {
        let example = build_example(xml_name, category, data_dir, label_map)?;
        writer
            .send(&example)
            .with_context(|| format!("failed to write record to {}", path.display()))?;
        pb.inc(1);
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush record file {}", path.display()))?;
    pb.finish_with_message(format!("Wrote {}", path.display()));

    Ok(())
}
