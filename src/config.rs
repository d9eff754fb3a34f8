use clap::Parser;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Directory holding the per-category annotation XML files, relative to the
/// dataset root.
pub const XML_DIR: &str = "annotations/xmls";

/// Directory holding the PNG images, relative to the dataset root.
pub const IMAGE_DIR: &str = "images";

/// Directory the record files are written under, relative to the dataset root.
pub const RECORD_DIR: &str = "tf_record";

/// Infix used when naming record files, e.g. `train.record-0000-00010`.
pub const RECORD_EXTENSION: &str = ".record-000";

/// Command-line arguments parser for converting VOC XML annotations to TFRecord.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Root directory containing the annotations/ and images/ directories
    #[arg(short = 'd', long = "data_dir", default_value = ".")]
    pub data_dir: String,

    /// Number of shards the training set is split into
    #[arg(short = 's', long = "shards", default_value_t = 1, value_parser = validate_shards)]
    pub shards: usize,

    /// Create records for the face dataset
    #[arg(short = 'f', long = "face")]
    pub face: bool,

    /// Create records for the license plate dataset
    #[arg(short = 'l', long = "license_plate")]
    pub license_plate: bool,

    /// Proportion of the dataset to use for validation
    #[arg(long = "val_size", default_value_t = 0.2, value_parser = validate_size)]
    pub val_size: f32,

    /// Seed for the random train/val partitioning
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,
}

impl Args {
    /// Categories selected on the command line, in a fixed processing order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        if self.face {
            categories.push(Category::Face);
        }
        if self.license_plate {
            categories.push(Category::LicensePlate);
        }
        categories
    }
}

// The two object classes this pipeline knows how to process
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Category {
    Face,
    LicensePlate,
}

impl Category {
    /// Name of the category's annotation and output subdirectories.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Face => "face",
            Category::LicensePlate => "license_plate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The fixed class-name to label-id dictionary shared by all categories.
///
/// Built once per run and passed by reference into the example builder; any
/// class name outside this map is an error.
pub fn class_label_map() -> HashMap<String, i64> {
    HashMap::from([("license_plate".to_string(), 1), ("face".to_string(), 2)])
}

// Validate that the size is between 0.0 and 1.0
fn validate_size(s: &str) -> Result<f32, String> {
    match f32::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}

// Validate that the shard count is at least 1
fn validate_shards(s: &str) -> Result<usize, String> {
    match usize::from_str(s) {
        Ok(val) if val >= 1 => Ok(val),
        _ => Err("SHARDS must be an integer greater than or equal to 1".to_string()),
    }
}
