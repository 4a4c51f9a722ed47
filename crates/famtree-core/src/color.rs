//! Color handling for rendered family trees
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Style settings are written as CSS color strings in
//! configuration files and validated here before anything is rendered.

use std::str::FromStr;

use color::DynamicColor;
use thiserror::Error;

/// Error returned when a CSS color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use famtree_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}
