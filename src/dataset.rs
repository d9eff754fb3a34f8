use anyhow::Result;
use log::info;
use rand::rngs::StdRng;
use rand::{seq::index, Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::{Args, Category};
use crate::io::{list_annotations, setup_output_directory, write_record_file};
use crate::types::SplitData;

/// Split the examples into training and validation sets.
///
/// Selects `round(val_size * N)` validation examples by uniform sampling
/// without replacement; the training set keeps the remaining examples in
/// their original order. The input slice is not modified.
pub fn split_examples<R: Rng>(examples: &[String], val_size: f32, rng: &mut R) -> SplitData {
    let val_count = (examples.len() as f32 * val_size).round() as usize;
    let val_count = val_count.min(examples.len());

    let picked = index::sample(rng, examples.len(), val_count);
    let chosen: HashSet<usize> = picked.iter().collect();

    let val = picked.iter().map(|i| examples[i].clone()).collect();
    let train = examples
        .iter()
        .enumerate()
        .filter(|(i, _)| !chosen.contains(i))
        .map(|(_, example)| example.clone())
        .collect();

    SplitData { train, val }
}

/// Split the training set into `shards` contiguous groups.
///
/// Sizes differ by at most one, with the first `N mod shards` groups taking
/// the extra element; concatenating the groups reproduces the input order.
/// Shard counts larger than the list produce empty groups.
pub fn shard_examples(examples: &[String], shards: usize) -> Vec<Vec<String>> {
    let base = examples.len() / shards;
    let extra = examples.len() % shards;

    let mut groups = Vec::with_capacity(shards);
    let mut start = 0;
    for index in 0..shards {
        let size = base + usize::from(index < extra);
        groups.push(examples[start..start + size].to_vec());
        start += size;
    }
    groups
}

/// Run the whole pipeline for one category: list, partition, shard, and write
/// one record file per training shard plus one for the validation set.
pub fn process_category(
    category: Category,
    args: &Args,
    label_map: &HashMap<String, i64>,
) -> Result<()> {
    let data_dir = Path::new(&args.data_dir);

    let examples = list_annotations(data_dir, category)?;
    info!(
        "Found {} annotation files for category '{}'.",
        examples.len(),
        category
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let split = split_examples(&examples, args.val_size, &mut rng);
    info!(
        "Split into {} training and {} validation examples.",
        split.train.len(),
        split.val.len()
    );

    let output_dir = setup_output_directory(data_dir, category)?;

    let shards = shard_examples(&split.train, args.shards);
    for (index, shard) in shards.iter().enumerate() {
        write_record_file(
            shard, "train", index, category, data_dir, &output_dir, label_map,
        )?;
    }
    write_record_file(&split.val, "val", 0, category, data_dir, &output_dir, label_map)?;

    info!("Finished writing records for category '{}'.", category);
    Ok(())
}
