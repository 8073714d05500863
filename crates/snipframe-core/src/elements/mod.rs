//! Element definitions for the snippet canvas.

mod code;
mod common;
mod image;
mod text;

pub use code::CodeElement;
pub use common::{ElementCommon, ElementId, ELEMENT_VERSION, MAX_SCALE, MIN_SCALE};
pub use image::ImageElement;
pub use text::TextElement;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminant for element kinds, used by factories and inspectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    CodeEditor,
    Text,
    Image,
}

/// Enum wrapper for all element types (tagged for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "code-editor")]
    Code(CodeElement),
    #[serde(rename = "text")]
    Text(TextElement),
    #[serde(rename = "image")]
    Image(ImageElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        self.common().id
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Code(_) => ElementKind::CodeEditor,
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
        }
    }

    /// Shared geometry and interaction flags.
    pub fn common(&self) -> &ElementCommon {
        match self {
            Element::Code(e) => &e.common,
            Element::Text(e) => &e.common,
            Element::Image(e) => &e.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut ElementCommon {
        match self {
            Element::Code(e) => &mut e.common,
            Element::Text(e) => &mut e.common,
            Element::Image(e) => &mut e.common,
        }
    }

    /// Minimum unscaled width enforced by every resize operation.
    pub fn min_width(&self) -> f64 {
        match self {
            Element::Code(_) => CodeElement::MIN_WIDTH,
            Element::Text(_) => TextElement::MIN_WIDTH,
            Element::Image(_) => ImageElement::MIN_WIDTH,
        }
    }

    /// Minimum unscaled height enforced by every resize operation.
    pub fn min_height(&self) -> f64 {
        match self {
            Element::Code(_) => CodeElement::MIN_HEIGHT,
            Element::Text(_) => TextElement::MIN_HEIGHT,
            Element::Image(_) => ImageElement::MIN_HEIGHT,
        }
    }

    /// Whether this kind derives its size from rendered content.
    pub fn supports_auto_size(&self) -> bool {
        match self {
            Element::Code(_) | Element::Text(_) => true,
            Element::Image(_) => false,
        }
    }

    /// Regenerate the element's ID with a new unique identifier.
    ///
    /// Used when duplicating or pasting elements so copies stay distinct.
    pub fn regenerate_id(&mut self) {
        self.common_mut().id = Uuid::new_v4();
    }
}
