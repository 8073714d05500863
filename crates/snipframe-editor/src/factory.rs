//! The "add element" collaborator: builds fully-initialized elements.

use kurbo::Size;
use snipframe_core::elements::{CodeElement, ImageElement, TextElement};
use snipframe_core::{Element, ElementKind};

/// Creates a new element of a requested kind, centered on the canvas.
///
/// Hosts substitute their own factory to seed kind-specific defaults
/// (starter code, workspace fonts, upload placeholders).
pub trait ElementFactory {
    fn create(&self, kind: ElementKind, canvas: Size) -> Element;
}

/// Factory with the stock defaults for every kind.
#[derive(Debug, Default)]
pub struct DefaultElementFactory;

impl ElementFactory for DefaultElementFactory {
    fn create(&self, kind: ElementKind, canvas: Size) -> Element {
        match kind {
            ElementKind::CodeEditor => {
                let (x, y) = centered(canvas, CodeElement::DEFAULT_WIDTH, CodeElement::DEFAULT_HEIGHT);
                Element::Code(CodeElement::new(x, y))
            }
            ElementKind::Text => {
                let (x, y) = centered(canvas, TextElement::DEFAULT_WIDTH, TextElement::DEFAULT_HEIGHT);
                Element::Text(TextElement::new(x, y))
            }
            ElementKind::Image => {
                let (x, y) =
                    centered(canvas, ImageElement::DEFAULT_WIDTH, ImageElement::DEFAULT_HEIGHT);
                Element::Image(ImageElement::new(x, y, String::new()))
            }
        }
    }
}

fn centered(canvas: Size, width: f64, height: f64) -> (f64, f64) {
    (
        ((canvas.width - width) / 2.0).round(),
        ((canvas.height - height) / 2.0).round(),
    )
}
