//! Geometry and flags shared by every element kind.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Allowed range for the uniform element scale.
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

/// Version string stamped on newly created elements (migration seam).
pub const ELEMENT_VERSION: &str = "1";

fn default_scale() -> f64 {
    1.0
}

fn default_version() -> String {
    ELEMENT_VERSION.to_string()
}

/// Fields common to all element kinds.
///
/// All geometry is in canvas-space units: `x`/`y` is the top-left of the
/// unscaled content box, `scale` is a uniform multiplier applied around that
/// box, and `rotation` is degrees about the element's center (display-only,
/// it never feeds back into the stored offset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementCommon {
    pub id: ElementId,
    /// Display label, never used in geometry.
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub x: f64,
    pub y: f64,
    /// Unscaled content-box width, always > 0.
    pub width: f64,
    /// Unscaled content-box height, always > 0.
    pub height: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Rotation in degrees, unbounded.
    #[serde(default)]
    pub rotation: f64,
    /// Width is derived from rendered content rather than user-set.
    #[serde(default)]
    pub auto_width: bool,
    /// Height is derived from rendered content rather than user-set.
    #[serde(default)]
    pub auto_height: bool,
    /// Resize operations preserve the width:height ratio.
    #[serde(default)]
    pub width_height_linked: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub locked: bool,
}

impl ElementCommon {
    /// Create common fields for a new element with default geometry.
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            version: default_version(),
            x,
            y,
            width,
            height,
            scale: 1.0,
            rotation: 0.0,
            auto_width: false,
            auto_height: false,
            width_height_linked: false,
            hidden: false,
            locked: false,
        }
    }

    /// On-canvas width after applying `scale`.
    pub fn scaled_width(&self) -> f64 {
        self.width * self.scale
    }

    /// On-canvas height after applying `scale`.
    pub fn scaled_height(&self) -> f64 {
        self.height * self.scale
    }

    /// Current width:height ratio of the unscaled content box.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Set the scale, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Enable/disable content-derived width.
    ///
    /// Aspect linking only makes sense when both dimensions are manually
    /// sized, so turning an auto dimension on forces the link off.
    pub fn set_auto_width(&mut self, on: bool) {
        self.auto_width = on;
        if on {
            self.width_height_linked = false;
        }
    }

    /// Enable/disable content-derived height.
    pub fn set_auto_height(&mut self, on: bool) {
        self.auto_height = on;
        if on {
            self.width_height_linked = false;
        }
    }

    /// Link width and height; refused while either dimension is auto-sized.
    pub fn set_width_height_linked(&mut self, on: bool) {
        self.width_height_linked = on && !self.auto_width && !self.auto_height;
    }

    /// Whether interaction handles may attach to this element.
    pub fn is_interactive(&self) -> bool {
        !self.hidden && !self.locked
    }
}
