//! Canvas background: solid colors, linear gradients, optional image.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A single stop of a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis, 0.0 at the start, 1.0 at the end.
    pub offset: f64,
    pub color: SerializableColor,
}

/// Multi-stop linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Gradient axis angle in degrees (0 = left to right).
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Create a two-stop gradient from `from` to `to`.
    pub fn two_stop(angle: f64, from: SerializableColor, to: SerializableColor) -> Self {
        Self {
            angle,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }
}

/// Background color: a solid fill or a linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BackgroundColor {
    Solid { color: SerializableColor },
    Gradient(LinearGradient),
}

/// How a background or element image is fit into its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFill {
    /// Letterbox the image inside the frame.
    Contain,
    /// Fill the frame, cropping overflow.
    #[default]
    Cover,
    /// Stretch to the frame, ignoring aspect ratio.
    Fill,
}

/// Canvas background definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// Solid or gradient fill behind everything (None = transparent).
    pub color: Option<BackgroundColor>,
    /// Optional background image reference (URL or data URI, opaque here).
    pub image: Option<String>,
    #[serde(default)]
    pub image_fill: ImageFill,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: Some(BackgroundColor::Solid {
                color: SerializableColor::white(),
            }),
            image: None,
            image_fill: ImageFill::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_peniko_roundtrip() {
        let color = SerializableColor::new(12, 200, 34, 128);
        let peniko: Color = color.into();
        let back: SerializableColor = peniko.into();
        assert_eq!(color, back);
    }

    #[test]
    fn test_gradient_two_stop() {
        let gradient =
            LinearGradient::two_stop(45.0, SerializableColor::black(), SerializableColor::white());
        assert_eq!(gradient.stops.len(), 2);
        assert!((gradient.stops[0].offset - 0.0).abs() < f64::EPSILON);
        assert!((gradient.stops[1].offset - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_background_json_shape() {
        let background = Background::default();
        let json = serde_json::to_value(&background).unwrap();
        assert_eq!(json["color"]["type"], "solid");
        assert_eq!(json["imageFill"], "cover");
    }
}
