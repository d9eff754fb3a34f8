//! Pascal VOC to TFRecord converter
//!
//! This library provides functionality to convert Pascal VOC XML annotations
//! paired with PNG images into sharded TFRecord files for object detection
//! training.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod io;
pub mod proto;
pub mod record;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{class_label_map, Args, Category};
pub use conversion::build_example;
pub use dataset::{process_category, shard_examples, split_examples};
pub use io::{list_annotations, record_file_name, write_record_file};
pub use proto::{Example, Feature};
pub use record::{RecordReader, RecordWriter};
pub use types::{Annotation, SplitData};
