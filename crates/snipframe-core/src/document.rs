//! Snippet document: the fixed-size export frame and its ordered elements.

use crate::background::Background;
use crate::elements::{Element, ElementId};
use serde::{Deserialize, Serialize};

/// Version string stamped on newly created documents (migration seam).
pub const DOCUMENT_VERSION: &str = "1";

/// Minimum canvas frame size per axis, enforced by canvas resize.
pub const CANVAS_MIN_SIZE: f64 = 200.0;

/// Offset applied to duplicated elements so the copy is visibly distinct.
pub const DUPLICATE_OFFSET: f64 = 10.0;

/// Axis selector for alignment operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Alignment keyword relative to the canvas frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    Center,
    End,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

/// A snippet document: canvas frame plus the ordered element list.
///
/// Element order is the sole source of stacking: index 0 is painted first
/// (backmost), the last index is painted last (frontmost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetDocument {
    #[serde(default = "default_version")]
    pub version: String,
    /// Export frame width in canvas units.
    pub width: f64,
    /// Export frame height in canvas units.
    pub height: f64,
    /// Canvas resize preserves the frame aspect ratio.
    #[serde(default)]
    pub width_height_linked: bool,
    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Default for SnippetDocument {
    fn default() -> Self {
        Self::new(900.0, 600.0)
    }
}

impl SnippetDocument {
    /// Create an empty document with the given frame size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            version: default_version(),
            width,
            height,
            width_height_linked: false,
            background: Background::default(),
            elements: Vec::new(),
        }
    }

    /// Append an element on top of the stack.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Remove an element by ID.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Get an element by ID.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Stack index of an element (0 = backmost).
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Duplicate an element: fresh id, offset by `DUPLICATE_OFFSET` on both
    /// axes, inserted directly above the source. Returns the new id.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let index = self.index_of(id)?;
        let mut copy = self.elements[index].clone();
        copy.regenerate_id();
        {
            let common = copy.common_mut();
            common.x += DUPLICATE_OFFSET;
            common.y += DUPLICATE_OFFSET;
        }
        let new_id = copy.id();
        self.elements.insert(index + 1, copy);
        Some(new_id)
    }

    /// Move an element to the top of the stack (painted last).
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index < self.elements.len() - 1 => {
                let element = self.elements.remove(index);
                self.elements.push(element);
                true
            }
            _ => false,
        }
    }

    /// Move an element to the bottom of the stack (painted first).
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                let element = self.elements.remove(index);
                self.elements.insert(0, element);
                true
            }
            _ => false,
        }
    }

    /// Move an element one step towards the front.
    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        if let Some(index) = self.index_of(id) {
            if index < self.elements.len() - 1 {
                self.elements.swap(index, index + 1);
                return true;
            }
        }
        false
    }

    /// Move an element one step towards the back.
    pub fn send_backward(&mut self, id: ElementId) -> bool {
        if let Some(index) = self.index_of(id) {
            if index > 0 {
                self.elements.swap(index, index - 1);
                return true;
            }
        }
        false
    }

    /// Align an element to the canvas frame on one axis, leaving the other
    /// axis untouched. Alignment uses the element's scaled size.
    pub fn align_element(&mut self, id: ElementId, axis: Axis, alignment: Alignment) -> bool {
        let (frame_width, frame_height) = (self.width, self.height);
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        let common = element.common_mut();
        match axis {
            Axis::Horizontal => {
                common.x = aligned_offset(frame_width, common.scaled_width(), alignment);
            }
            Axis::Vertical => {
                common.y = aligned_offset(frame_height, common.scaled_height(), alignment);
            }
        }
        true
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn aligned_offset(frame: f64, size: f64, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::Start => 0.0,
        Alignment::Center => (frame - size) / 2.0,
        Alignment::End => frame - size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{CodeElement, TextElement};

    fn doc_with_elements(count: usize) -> (SnippetDocument, Vec<ElementId>) {
        let mut doc = SnippetDocument::new(600.0, 400.0);
        let ids = (0..count)
            .map(|i| doc.add_element(Element::Code(CodeElement::new(i as f64 * 10.0, 0.0))))
            .collect();
        (doc, ids)
    }

    #[test]
    fn test_add_and_lookup() {
        let (doc, ids) = doc_with_elements(2);
        assert_eq!(doc.len(), 2);
        assert!(doc.element(ids[0]).is_some());
        assert_eq!(doc.index_of(ids[1]), Some(1));
    }

    #[test]
    fn test_remove_element() {
        let (mut doc, ids) = doc_with_elements(2);
        assert!(doc.remove_element(ids[0]).is_some());
        assert_eq!(doc.len(), 1);
        assert!(doc.remove_element(ids[0]).is_none());
    }

    #[test]
    fn test_duplicate_offsets_and_inserts_above() {
        let (mut doc, ids) = doc_with_elements(3);
        let source = doc.element(ids[1]).unwrap().common().clone();

        let new_id = doc.duplicate_element(ids[1]).unwrap();
        assert_ne!(new_id, ids[1]);
        // Inserted directly above the source.
        assert_eq!(doc.index_of(new_id), Some(2));

        let copy = doc.element(new_id).unwrap().common();
        assert!((copy.x - (source.x + 10.0)).abs() < f64::EPSILON);
        assert!((copy.y - (source.y + 10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_z_order_moves() {
        let (mut doc, ids) = doc_with_elements(3);

        assert!(doc.bring_to_front(ids[0]));
        assert_eq!(doc.index_of(ids[0]), Some(2));
        assert!(!doc.bring_to_front(ids[0]));

        assert!(doc.send_to_back(ids[0]));
        assert_eq!(doc.index_of(ids[0]), Some(0));

        assert!(doc.bring_forward(ids[0]));
        assert_eq!(doc.index_of(ids[0]), Some(1));

        assert!(doc.send_backward(ids[0]));
        assert_eq!(doc.index_of(ids[0]), Some(0));
        assert!(!doc.send_backward(ids[0]));
    }

    #[test]
    fn test_align_to_canvas() {
        let mut doc = SnippetDocument::new(600.0, 400.0);
        let mut element = TextElement::new(0.0, 0.0);
        element.common.set_auto_width(false);
        element.common.set_auto_height(false);
        element.common.width = 100.0;
        element.common.height = 50.0;
        let id = doc.add_element(Element::Text(element));

        assert!(doc.align_element(id, Axis::Horizontal, Alignment::Center));
        assert!((doc.element(id).unwrap().common().x - 250.0).abs() < f64::EPSILON);

        assert!(doc.align_element(id, Axis::Vertical, Alignment::End));
        assert!((doc.element(id).unwrap().common().y - 350.0).abs() < f64::EPSILON);

        assert!(doc.align_element(id, Axis::Horizontal, Alignment::Start));
        assert!((doc.element(id).unwrap().common().x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_align_uses_scaled_size() {
        let mut doc = SnippetDocument::new(600.0, 400.0);
        let mut element = TextElement::new(0.0, 0.0);
        element.common.width = 100.0;
        element.common.height = 50.0;
        element.common.set_scale(2.0);
        let id = doc.add_element(Element::Text(element));

        doc.align_element(id, Axis::Horizontal, Alignment::Center);
        // (600 - 200) / 2
        assert!((doc.element(id).unwrap().common().x - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_roundtrip() {
        let (doc, _) = doc_with_elements(2);
        let json = doc.to_json().unwrap();
        let back = SnippetDocument::from_json(&json).unwrap();
        assert_eq!(back, doc);
        assert!(json.contains("widthHeightLinked"));
    }
}
