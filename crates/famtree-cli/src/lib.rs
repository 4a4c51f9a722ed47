//! famtree CLI library
//!
//! This module contains the core CLI logic for the famtree layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::{info, warn};

use famtree::{FamTreeError, FamilySnapshot, FamilyTreeBuilder, InputFormat};

use error_adapter::issues_to_reportables;

/// Run the famtree CLI application
///
/// This function reads a family snapshot, reports relations that cannot be
/// shown as declared, and writes the laid-out tree as SVG or JSON.
///
/// # Errors
///
/// Returns `FamTreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unreadable or malformed snapshots
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), FamTreeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing family tree"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let format = InputFormat::from_path(&args.input).ok_or_else(|| {
        FamTreeError::Input(format!(
            "cannot tell the format of `{}`: expected a .json or .toml file",
            args.input
        ))
    })?;
    let source = fs::read_to_string(&args.input)?;

    let mut snapshot = FamilySnapshot::parse(&source, format)?;
    if let Some(active_user) = &args.active_user {
        snapshot = snapshot.with_active_user(active_user.as_str());
    }

    let builder = FamilyTreeBuilder::try_new(app_config)?;
    report_issues(&builder, &snapshot);

    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&snapshot)?,
        OutputFormat::Json => builder.render_json(&snapshot)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output, format:? = args.format; "Family tree exported successfully");

    Ok(())
}

fn report_issues(builder: &FamilyTreeBuilder, snapshot: &FamilySnapshot) {
    let issues = builder.inspect(snapshot);
    if issues.is_empty() {
        return;
    }

    let reporter = miette::GraphicalReportHandler::new();
    for reportable in issues_to_reportables(&issues) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_ok() {
            warn!("{writer}");
        }
    }
    warn!(issues = issues.len(); "Some relations are not shown as declared");
}
