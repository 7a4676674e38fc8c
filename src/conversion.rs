//! Conversion between display RGB and the bridge's xy + brightness form.
//!
//! Both directions go through CIE XYZ using the Wide RGB D65 matrices. The
//! functions are pure and may be called from any thread.

use crate::types::{ColorXy, UnclampedRgb};

/// Linear RGB to XYZ, one row per output component.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.664511, 0.154324, 0.162028],
    [0.283881, 0.668433, 0.047685],
    [0.000000, 0.072310, 0.986039],
];

/// XYZ to linear RGB, the inverse of [`RGB_TO_XYZ`].
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [1.656492, -0.354851, -0.255038],
    [-0.707196, 1.655397, 0.036152],
    [0.051713, -0.121364, 1.011530],
];

const GAMMA_THRESHOLD: f64 = 0.04045;
const GAMMA_SCALE: f64 = 12.92;
const GAMMA_EXPONENT: f64 = 2.4;
const GAMMA_OFFSET: f64 = 0.055;
const REVERSE_GAMMA_THRESHOLD: f64 = 0.0031308;

/// Convert an RGB triple to xy chromaticity and brightness.
///
/// Black has no chromaticity and maps to `x = y = 0` with brightness 0.
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::conversion::rgb_to_xy;
///
/// let black = rgb_to_xy(0, 0, 0);
/// assert_eq!((black.x(), black.y(), black.brightness()), (0.0, 0.0, 0));
///
/// let white = rgb_to_xy(255, 255, 255);
/// assert_eq!(white.brightness(), 255);
/// ```
pub fn rgb_to_xy(red: u8, green: u8, blue: u8) -> ColorXy {
    let linear = [red, green, blue].map(|c| gamma_expand(f64::from(c) / 255.0));
    let [x, y, z] = apply(&RGB_TO_XYZ, linear);

    let sum = x + y + z;
    let (cx, cy) = if sum == 0.0 {
        (0.0, 0.0)
    } else {
        (x / sum, y / sum)
    };

    ColorXy::with_brightness(cx, cy, (y * 255.0).round() as u8)
}

/// Convert xy chromaticity and brightness back to RGB.
///
/// `y` must not be zero: the conversion divides by it. With `y == 0` the
/// intermediate values are not finite and the channels come out of Rust's
/// saturating float-to-int conversion (NaN becomes 0, so the black point
/// `(0, 0, 0)` maps back to black).
///
/// Channels are rounded independently and never clamped, so out-of-gamut
/// input can produce values outside 0-255; see [`UnclampedRgb::clamped`].
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::UnclampedRgb;
/// use hue_bridge_rs::conversion::xy_to_rgb;
///
/// assert_eq!(xy_to_rgb(0.3227, 0.329, 255), UnclampedRgb::new(255, 255, 255));
/// assert!(!xy_to_rgb(0.8, 0.1, 255).is_displayable());
/// ```
pub fn xy_to_rgb(x: f64, y: f64, brightness: u8) -> UnclampedRgb {
    let big_y = f64::from(brightness) / 255.0;
    let big_x = (big_y / y) * x;
    let big_z = (big_y / y) * (1.0 - x - y);

    let [red, green, blue] = apply(&XYZ_TO_RGB, [big_x, big_y, big_z])
        .map(|c| (gamma_compress(c) * 255.0).round() as i32);

    UnclampedRgb::new(red, green, blue)
}

fn gamma_expand(value: f64) -> f64 {
    if value > GAMMA_THRESHOLD {
        ((value + GAMMA_OFFSET) / (1.0 + GAMMA_OFFSET)).powf(GAMMA_EXPONENT)
    } else {
        value / GAMMA_SCALE
    }
}

fn gamma_compress(value: f64) -> f64 {
    if value <= REVERSE_GAMMA_THRESHOLD {
        GAMMA_SCALE * value
    } else {
        (1.0 + GAMMA_OFFSET) * value.powf(1.0 / GAMMA_EXPONENT) - GAMMA_OFFSET
    }
}

fn apply(matrix: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    matrix.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}
