//! Display RGB color representation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::conversion;
use crate::errors::Error;
use crate::types::ColorXy;

/// An RGB color with red, green, and blue components (0-255 each).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub(crate) red: u8,
    pub(crate) green: u8,
    pub(crate) blue: u8,
}

impl Color {
    /// Create a color with the given RGB values.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a default color (black: 0,0,0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// Convert to the bridge's xy chromaticity plus brightness.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Color;
    ///
    /// let xy = Color::rgb(255, 0, 0).to_xy();
    /// assert_eq!(xy.brightness(), 72);
    /// assert!((xy.x() - 0.7007).abs() < 1e-4);
    /// ```
    pub fn to_xy(&self) -> ColorXy {
        conversion::rgb_to_xy(self.red, self.green, self.blue)
    }
}

impl From<&Color> for ColorXy {
    fn from(color: &Color) -> Self {
        color.to_xy()
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse from comma-separated string (e.g., "255,128,0").
    ///
    /// ```
    /// use std::str::FromStr;
    /// use hue_bridge_rs::Color;
    ///
    /// assert_eq!(Color::from_str("255, 128,0").unwrap(), Color::rgb(255, 128, 0));
    /// assert!(Color::from_str("256,0,0").is_err());
    /// assert!(Color::from_str("1,2").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidColorString(s.to_string());
        let parts = s
            .split(',')
            .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<u8>, Error>>()?;

        match parts.as_slice() {
            [red, green, blue] => Ok(Self::rgb(*red, *green, *blue)),
            _ => Err(invalid()),
        }
    }
}
