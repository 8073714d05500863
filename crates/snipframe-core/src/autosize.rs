//! Content-measurement feedback for auto-sized elements.
//!
//! The host UI owns a layout observer over each element's rendered box and
//! calls [`apply_measured`] whenever content or font changes alter it. The
//! engine only depends on this hook, not on any specific observer API.

use crate::elements::ElementId;
use crate::stores::DocumentStore;
use kurbo::Size;

/// Write a measured content size back into the document, per axis, for the
/// axes whose auto flag is set.
///
/// Idempotent: re-measuring unchanged content never perturbs stored values
/// beyond rounding, and an unchanged measurement produces no store write at
/// all (so observers are not re-triggered into a render loop).
///
/// Returns true when the document changed.
pub fn apply_measured(document: &mut DocumentStore, id: ElementId, measured: Size) -> bool {
    let Some(element) = document.state().element(id) else {
        return false;
    };
    if !element.supports_auto_size() {
        return false;
    }

    let common = element.common();
    let width = measured.width.round().max(element.min_width());
    let height = measured.height.round().max(element.min_height());

    let write_width = common.auto_width && (common.width - width).abs() > f64::EPSILON;
    let write_height = common.auto_height && (common.height - height).abs() > f64::EPSILON;
    if !write_width && !write_height {
        return false;
    }

    document.update_element(id, |element| {
        let common = element.common_mut();
        if write_width {
            common.width = width;
        }
        if write_height {
            common.height = height;
        }
    })
}
