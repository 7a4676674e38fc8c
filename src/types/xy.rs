//! CIE xy chromaticity with brightness, the bridge's native color form.

use serde::{Deserialize, Serialize};

use crate::conversion;
use crate::types::Color;

/// A color as xy chromaticity coordinates plus a 0-255 brightness.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ColorXy {
    pub(crate) x: f64,
    pub(crate) y: f64,
    #[serde(rename = "bri")]
    pub(crate) brightness: u8,
}

impl ColorXy {
    pub const DEFAULT_BRIGHTNESS: u8 = 255;

    /// Chromaticity at full brightness.
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_brightness(x, y, Self::DEFAULT_BRIGHTNESS)
    }

    pub fn with_brightness(x: f64, y: f64, brightness: u8) -> Self {
        ColorXy { x, y, brightness }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Convert back to RGB. See [`conversion::xy_to_rgb`] for the `y == 0`
    /// precondition and out-of-gamut behavior.
    pub fn to_rgb(&self) -> UnclampedRgb {
        conversion::xy_to_rgb(self.x, self.y, self.brightness)
    }
}

/// RGB channels straight out of the xy conversion.
///
/// Out-of-gamut inputs give channels outside 0-255; nothing is clamped unless
/// the caller asks for it with [`UnclampedRgb::clamped`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct UnclampedRgb {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl UnclampedRgb {
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        UnclampedRgb { red, green, blue }
    }

    /// True when every channel already fits in 0-255.
    pub fn is_displayable(&self) -> bool {
        [self.red, self.green, self.blue]
            .iter()
            .all(|c| (0..=255).contains(c))
    }

    /// Clamp each channel independently into 0-255.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::{Color, UnclampedRgb};
    ///
    /// let rgb = UnclampedRgb::new(300, -4, 128);
    /// assert!(!rgb.is_displayable());
    /// assert_eq!(rgb.clamped(), Color::rgb(255, 0, 128));
    /// ```
    pub fn clamped(&self) -> Color {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        Color::rgb(clamp(self.red), clamp(self.green), clamp(self.blue))
    }
}

impl From<Color> for UnclampedRgb {
    fn from(color: Color) -> Self {
        UnclampedRgb::new(color.red.into(), color.green.into(), color.blue.into())
    }
}
