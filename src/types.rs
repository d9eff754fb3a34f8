use serde::Deserialize;

// The Annotation struct representing one VOC XML annotation file
#[derive(Debug, Deserialize, Clone)]
pub struct Annotation {
    #[serde(rename = "object", default)]
    pub objects: Vec<AnnotatedObject>,
}

// A single annotated object: class name plus pixel-coordinate bounding box
#[derive(Debug, Deserialize, Clone)]
pub struct AnnotatedObject {
    pub name: String,
    pub bndbox: BndBox,
}

// Bounding box corners in pixel coordinates, as written by the annotation tool
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BndBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

// Struct to hold the split datasets for training and validation
#[derive(Debug, Clone)]
pub struct SplitData {
    pub train: Vec<String>,
    pub val: Vec<String>,
}
