//! Code block element.

use super::ElementCommon;
use serde::{Deserialize, Serialize};

/// A syntax-highlighted code block.
///
/// The code text, language and theme are opaque to the geometry engine; the
/// renderer collaborator interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeElement {
    #[serde(flatten)]
    pub common: ElementCommon,
    pub code: String,
    pub language: String,
    pub theme: String,
    #[serde(default = "CodeElement::default_font_size")]
    pub font_size: f64,
}

impl CodeElement {
    /// Minimum unscaled content-box size enforced by resize operations.
    pub const MIN_WIDTH: f64 = 20.0;
    pub const MIN_HEIGHT: f64 = 20.0;

    /// Default content-box size for newly created code blocks.
    pub const DEFAULT_WIDTH: f64 = 480.0;
    pub const DEFAULT_HEIGHT: f64 = 260.0;

    fn default_font_size() -> f64 {
        14.0
    }

    /// Create a code block with default content at the given position.
    pub fn new(x: f64, y: f64) -> Self {
        let mut common =
            ElementCommon::new("Code", x, y, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT);
        // Fresh code blocks grow with their content until manually resized.
        common.set_auto_width(true);
        common.set_auto_height(true);
        Self {
            common,
            code: String::new(),
            language: "plaintext".to_string(),
            theme: "dark".to_string(),
            font_size: Self::default_font_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_code_element_is_auto_sized() {
        let element = CodeElement::new(10.0, 20.0);
        assert!(element.common.auto_width);
        assert!(element.common.auto_height);
        assert!(!element.common.width_height_linked);
    }

    #[test]
    fn test_code_json_is_camel_case() {
        let element = CodeElement::new(0.0, 0.0);
        let json = serde_json::to_value(&element).unwrap();
        assert!(json.get("autoWidth").is_some());
        assert!(json.get("fontSize").is_some());
        assert!(json.get("auto_width").is_none());
    }
}
