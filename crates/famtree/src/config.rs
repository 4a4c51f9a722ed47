//! Configuration types for family-tree layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so a partial file (or none at all)
//! is valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Card dimensions, gaps, margins and root placement.
//! - [`StyleConfig`] - Colors and font size used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use famtree::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     card_width = 200.0
//!     root_placement = "overlap"
//!
//!     [style]
//!     highlight_color = "crimson"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().card_width(), 200.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use famtree_core::color::{Color, ColorError};

use crate::FamTreeError;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks both sections, reporting the first invalid setting.
    ///
    /// # Errors
    ///
    /// Returns [`FamTreeError::Config`] for negative or non-finite spacing,
    /// zero-sized cards, or unparsable colors.
    pub fn validate(&self) -> Result<(), FamTreeError> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// How independent root trees are placed relative to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPlacement {
    /// Each root tree starts `block_gap` to the right of the previous one.
    #[default]
    SideBySide,
    /// Every root tree starts at the left margin, as the web chart does.
    Overlap,
}

/// Dimensions and spacing used by the layout pass, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    card_width: f32,
    card_height: f32,
    couple_gap: f32,
    sibling_gap: f32,
    block_gap: f32,
    row_height: f32,
    margin: f32,
    root_placement: RootPlacement,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 180.0,
            card_height: 64.0,
            couple_gap: 16.0,
            sibling_gap: 32.0,
            block_gap: 96.0,
            row_height: 140.0,
            margin: 40.0,
            root_placement: RootPlacement::default(),
        }
    }
}

impl LayoutConfig {
    /// Width of one person card.
    pub fn card_width(&self) -> f32 {
        self.card_width
    }

    /// Height of one person card.
    pub fn card_height(&self) -> f32 {
        self.card_height
    }

    /// Horizontal gap between the two cards of a couple.
    pub fn couple_gap(&self) -> f32 {
        self.couple_gap
    }

    /// Horizontal gap between sibling subtrees.
    pub fn sibling_gap(&self) -> f32 {
        self.sibling_gap
    }

    /// Horizontal gap between independent root trees.
    pub fn block_gap(&self) -> f32 {
        self.block_gap
    }

    /// Vertical distance between the tops of consecutive generations.
    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Offset of the chart from the origin on both axes.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn root_placement(&self) -> RootPlacement {
        self.root_placement
    }

    pub fn with_card_size(mut self, width: f32, height: f32) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    pub fn with_couple_gap(mut self, gap: f32) -> Self {
        self.couple_gap = gap;
        self
    }

    pub fn with_sibling_gap(mut self, gap: f32) -> Self {
        self.sibling_gap = gap;
        self
    }

    pub fn with_block_gap(mut self, gap: f32) -> Self {
        self.block_gap = gap;
        self
    }

    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_root_placement(mut self, placement: RootPlacement) -> Self {
        self.root_placement = placement;
        self
    }

    /// Width of a single card or of a couple's two cards plus their gap.
    pub fn footprint(&self, member_count: usize) -> f32 {
        let count = member_count.max(1) as f32;
        count * self.card_width + (count - 1.0) * self.couple_gap
    }

    fn validate(&self) -> Result<(), FamTreeError> {
        let spacings = [
            ("couple_gap", self.couple_gap),
            ("sibling_gap", self.sibling_gap),
            ("block_gap", self.block_gap),
            ("row_height", self.row_height),
            ("margin", self.margin),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value < 0.0 {
                return Err(FamTreeError::Config(format!(
                    "layout.{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        for (name, value) in [
            ("card_width", self.card_width),
            ("card_height", self.card_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FamTreeError::Config(format!(
                    "layout.{name} must be a finite, positive number (got {value})"
                )));
            }
        }

        Ok(())
    }
}

/// Visual styling for the SVG exporter.
///
/// Colors are CSS color strings; unset fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    card_fill: Option<String>,
    card_stroke: Option<String>,
    highlight_color: Option<String>,
    connector_color: Option<String>,
    text_color: Option<String>,
    font_size: Option<u16>,
}

impl StyleConfig {
    /// Background of the whole chart, or `None` for a transparent canvas.
    pub fn background_color(&self) -> Result<Option<Color>, ColorError> {
        self.background_color.as_deref().map(Color::new).transpose()
    }

    pub fn card_fill(&self) -> Result<Color, ColorError> {
        Self::color_or(self.card_fill.as_deref(), "#f7f4ee")
    }

    pub fn card_stroke(&self) -> Result<Color, ColorError> {
        Self::color_or(self.card_stroke.as_deref(), "#5b6770")
    }

    /// Outline used for the card of the signed-in member.
    pub fn highlight_color(&self) -> Result<Color, ColorError> {
        Self::color_or(self.highlight_color.as_deref(), "#d9822b")
    }

    pub fn connector_color(&self) -> Result<Color, ColorError> {
        Self::color_or(self.connector_color.as_deref(), "#8a949c")
    }

    pub fn text_color(&self) -> Result<Color, ColorError> {
        Self::color_or(self.text_color.as_deref(), "#1f2933")
    }

    pub fn font_size(&self) -> u16 {
        self.font_size.unwrap_or(14)
    }

    pub fn with_background_color(mut self, color: &str) -> Self {
        self.background_color = Some(color.to_string());
        self
    }

    pub fn with_highlight_color(mut self, color: &str) -> Self {
        self.highlight_color = Some(color.to_string());
        self
    }

    fn color_or(value: Option<&str>, fallback: &str) -> Result<Color, ColorError> {
        Color::new(value.unwrap_or(fallback))
    }

    fn validate(&self) -> Result<(), FamTreeError> {
        let to_config_error = |err: ColorError| FamTreeError::Config(format!("style: {err}"));

        self.background_color().map_err(to_config_error)?;
        self.card_fill().map_err(to_config_error)?;
        self.card_stroke().map_err(to_config_error)?;
        self.highlight_color().map_err(to_config_error)?;
        self.connector_color().map_err(to_config_error)?;
        self.text_color().map_err(to_config_error)?;

        if self.font_size() == 0 {
            return Err(FamTreeError::Config(
                "style.font_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
