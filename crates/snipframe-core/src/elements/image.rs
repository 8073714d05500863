//! Image element.

use super::ElementCommon;
use crate::background::ImageFill;
use serde::{Deserialize, Serialize};

/// A placed image. The source reference (URL or data URI) is opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub source: String,
    #[serde(default)]
    pub fill: ImageFill,
}

impl ImageElement {
    pub const MIN_WIDTH: f64 = 20.0;
    pub const MIN_HEIGHT: f64 = 20.0;

    pub const DEFAULT_WIDTH: f64 = 320.0;
    pub const DEFAULT_HEIGHT: f64 = 240.0;

    /// Create an image element at the given position.
    pub fn new(x: f64, y: f64, source: impl Into<String>) -> Self {
        let mut common =
            ElementCommon::new("Image", x, y, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT);
        // Image size is always explicit; content measurement does not apply.
        common.set_width_height_linked(true);
        Self {
            common,
            source: source.into(),
            fill: ImageFill::default(),
        }
    }
}
