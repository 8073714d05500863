//! Rich-text element.

use super::ElementCommon;
use crate::background::SerializableColor;
use serde::{Deserialize, Serialize};

/// A block of styled text. Content markup is opaque to the geometry engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub color: SerializableColor,
}

impl TextElement {
    pub const MIN_WIDTH: f64 = 20.0;
    pub const MIN_HEIGHT: f64 = 20.0;

    pub const DEFAULT_WIDTH: f64 = 320.0;
    pub const DEFAULT_HEIGHT: f64 = 48.0;

    /// Create a text block with default content at the given position.
    pub fn new(x: f64, y: f64) -> Self {
        let mut common =
            ElementCommon::new("Text", x, y, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT);
        common.set_auto_width(true);
        common.set_auto_height(true);
        Self {
            common,
            content: "Text".to_string(),
            font_family: "Inter".to_string(),
            font_size: 16.0,
            color: SerializableColor::black(),
        }
    }
}
