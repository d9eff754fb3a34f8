use clap::Parser;
use log::{error, info, warn};

use voc2tfrecord::{class_label_map, process_category, Args};

fn main() {
    env_logger::init();

    let args = Args::parse();
    let categories = args.categories();
    if categories.is_empty() {
        warn!("No category selected; pass --face and/or --license_plate.");
        return;
    }

    let label_map = class_label_map();
    for category in categories {
        info!("Processing category '{}'...", category);
        if let Err(e) = process_category(category, &args, &label_map) {
            error!("Failed to process category '{}': {:#}", category, e);
            std::process::exit(1);
        }
    }
}
