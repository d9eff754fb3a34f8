use anyhow::{anyhow, Context, Result};
use image::GenericImageView;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::{Category, IMAGE_DIR, XML_DIR};
use crate::proto::{
    bytes_feature, bytes_list_feature, float_list_feature, int64_feature, int64_list_feature,
    Example,
};
use crate::types::Annotation;

/// Build the `tf.train.Example` for one annotation file.
///
/// Reads the paired PNG from the image directory, decodes it for its
/// dimensions, parses the VOC XML, and normalizes every bounding box
/// coordinate by the image width or height. Coordinates are not clamped, so
/// out-of-range source annotations propagate out-of-range normalized values.
pub fn build_example(
    xml_name: &str,
    category: Category,
    data_dir: &Path,
    label_map: &HashMap<String, i64>,
) -> Result<Example> {
    let stem = Path::new(xml_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("invalid annotation file name: {xml_name}"))?;

    let image_path = data_dir.join(IMAGE_DIR).join(format!("{stem}.png"));
    let encoded = fs::read(&image_path)
        .with_context(|| format!("failed to read image {}", image_path.display()))?;
    let (width, height) = image::load_from_memory(&encoded)
        .with_context(|| format!("failed to decode image {}", image_path.display()))?
        .dimensions();

    let xml_path = data_dir.join(XML_DIR).join(category.dir_name()).join(xml_name);
    let xml = fs::read_to_string(&xml_path)
        .with_context(|| format!("failed to read annotation {}", xml_path.display()))?;
    let annotation: Annotation = serde_xml_rs::from_str(&xml)
        .with_context(|| format!("failed to parse annotation {}", xml_path.display()))?;

    let mut classes_text = Vec::with_capacity(annotation.objects.len());
    let mut classes = Vec::with_capacity(annotation.objects.len());
    let mut xmins = Vec::with_capacity(annotation.objects.len());
    let mut ymins = Vec::with_capacity(annotation.objects.len());
    let mut xmaxs = Vec::with_capacity(annotation.objects.len());
    let mut ymaxs = Vec::with_capacity(annotation.objects.len());

    for object in &annotation.objects {
        let label = *label_map.get(object.name.as_str()).ok_or_else(|| {
            anyhow!(
                "unknown class '{}' in {}",
                object.name,
                xml_path.display()
            )
        })?;
        classes_text.push(object.name.clone().into_bytes());
        classes.push(label);
        xmins.push(object.bndbox.xmin as f32 / width as f32);
        ymins.push(object.bndbox.ymin as f32 / height as f32);
        xmaxs.push(object.bndbox.xmax as f32 / width as f32);
        ymaxs.push(object.bndbox.ymax as f32 / height as f32);
    }

    let filename = stem.as_bytes().to_vec();
    Ok(Example::from_features([
        ("image/height".to_string(), int64_feature(height as i64)),
        ("image/width".to_string(), int64_feature(width as i64)),
        ("image/filename".to_string(), bytes_feature(filename.clone())),
        ("image/source_id".to_string(), bytes_feature(filename)),
        ("image/encoded".to_string(), bytes_feature(encoded)),
        ("image/format".to_string(), bytes_feature(b"png".to_vec())),
        ("image/object/bbox/xmin".to_string(), float_list_feature(xmins)),
        ("image/object/bbox/xmax".to_string(), float_list_feature(xmaxs)),
        ("image/object/bbox/ymin".to_string(), float_list_feature(ymins)),
        ("image/object/bbox/ymax".to_string(), float_list_feature(ymaxs)),
        (
            "image/object/class/text".to_string(),
            bytes_list_feature(classes_text),
        ),
        (
            "image/object/class/label".to_string(),
            int64_list_feature(classes),
        ),
    ]))
}
