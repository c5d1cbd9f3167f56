//! The brush color picker state.

use serde::{Deserialize, Serialize};

use voxpaint_volume::Color;

/// HSV paint color with an erase toggle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaintColor {
    /// Hue in `[0, 1]`.
    pub hue: f32,
    /// Saturation in `[0, 1]`.
    pub saturation: f32,
    /// Value (brightness) in `[0, 1]`.
    pub value: f32,
    /// When set, brushes clear cells instead of coloring them.
    pub erase: bool,
}

impl PaintColor {
    /// Creates a non-erasing paint color.
    pub fn hsv(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
            erase: false,
        }
    }

    /// Returns the value brushes write: `None` while erasing.
    pub fn resolve(&self) -> Option<Color> {
        if self.erase {
            None
        } else {
            Some(Color::from_hsv(self.hue, self.saturation, self.value))
        }
    }

    /// Flips erase mode.
    pub fn toggle_erase(&mut self) {
        self.erase = !self.erase;
    }
}

impl Default for PaintColor {
    fn default() -> Self {
        Self::hsv(0.0, 0.8, 0.9)
    }
}
