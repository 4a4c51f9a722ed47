//! Error types for famtree operations.
//!
//! The engine itself never fails on messy family data: conflicting or
//! dangling relations are resolved deterministically. [`FamTreeError`] only
//! covers the edges of the pipeline: reading input, validating
//! configuration and exporting the rendered chart.

use std::io;

use thiserror::Error;

/// The main error type for famtree operations.
#[derive(Debug, Error)]
pub enum FamTreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}
