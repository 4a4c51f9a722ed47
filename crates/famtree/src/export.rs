//! Exporters for laid-out family trees.
//!
//! - [`svg`] draws the chart as a standalone SVG document.
//! - [`json`] serializes cell structure and geometry for external renderers.

pub mod json;
pub mod svg;

use thiserror::Error;

use famtree_core::color::ColorError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Style error: {0}")]
    Style(#[from] ColorError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
