//! famtree - family-tree layout for genealogy charts.
//!
//! Turns a flat set of people and parent / child / spouse relations into a
//! forest of cells (one person, or a couple merged into one box) and computes
//! coordinates for every cell, so a renderer can draw the chart.
//!
//! The stages are available individually:
//!
//! - [`policy`] decides which parent and which spouse survive conflicts;
//! - [`cells`] builds the forest and assigns generations and ranks;
//! - [`layout`] places every subtree;
//! - [`export`] writes the result as SVG or JSON;
//! - [`diagnostics`] explains what the builder had to drop.
//!
//! [`FamilyTreeBuilder`] chains them for the common case.

pub mod cells;
pub mod config;
pub mod diagnostics;
pub mod export;
pub mod layout;
pub mod policy;

mod error;
mod snapshot;

pub use famtree_core::{collation, color, geometry, identifier, model};

pub use error::FamTreeError;
pub use snapshot::{FamilySnapshot, InputFormat, PeopleById};

use log::{debug, info};

use cells::CellForest;
use config::AppConfig;
use diagnostics::RelationIssue;
use layout::{Layout, LayoutEngine};

/// Builder for laying out and rendering family trees.
///
/// # Examples
///
/// ```
/// use famtree::{FamilySnapshot, FamilyTreeBuilder, config::AppConfig};
/// use famtree_core::model::{Person, Relation};
///
/// let snapshot = FamilySnapshot::new(
///     vec![Person::named("a", "Alice"), Person::named("b", "Bob"), Person::named("c", "Carla")],
///     vec![Relation::spouse("a", "b"), Relation::parent("a", "c")],
/// )
/// .with_active_user("c");
///
/// let builder = FamilyTreeBuilder::new(AppConfig::default());
/// let forest = builder.build(&snapshot);
/// assert_eq!(forest.len(), 2);
///
/// let svg = builder.render_svg(&snapshot).unwrap();
/// assert!(svg.contains("couple:a-b"));
/// ```
#[derive(Debug, Default)]
pub struct FamilyTreeBuilder {
    config: AppConfig,
}

impl FamilyTreeBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// The configuration is used as given. Negative or non-finite spacings
    /// produce overlapping or NaN geometry; use [`Self::try_new`] for
    /// configuration that was not validated already.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Create a new builder after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FamTreeError::Config`] if a spacing is negative or not
    /// finite, a card dimension is not positive, or a style color does not
    /// parse.
    pub fn try_new(config: AppConfig) -> Result<Self, FamTreeError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds the cell forest for a snapshot.
    ///
    /// Never fails: unknown ids, self links and conflicting relations are
    /// resolved deterministically.
    pub fn build(&self, snapshot: &FamilySnapshot) -> CellForest {
        info!(
            people = snapshot.people.len(),
            relations = snapshot.relations.len();
            "Building family tree"
        );
        cells::build_cells(
            snapshot.active_user_id,
            &snapshot.people_by_id(),
            &snapshot.relations,
        )
    }

    /// Lays out a forest with the configured dimensions.
    pub fn layout(&self, forest: &CellForest) -> Layout {
        LayoutEngine::new(*self.config.layout()).layout(forest)
    }

    /// Reports the relations the builder ignores or overrides.
    pub fn inspect(&self, snapshot: &FamilySnapshot) -> Vec<RelationIssue> {
        let issues = diagnostics::inspect(&snapshot.people_by_id(), &snapshot.relations);
        debug!(issues = issues.len(); "Relations inspected");
        issues
    }

    /// Builds, lays out and renders a snapshot as SVG.
    ///
    /// # Errors
    ///
    /// Returns [`FamTreeError::Export`] if a style color is invalid.
    pub fn render_svg(&self, snapshot: &FamilySnapshot) -> Result<String, FamTreeError> {
        let people = snapshot.people_by_id();
        let forest = cells::build_cells(snapshot.active_user_id, &people, &snapshot.relations);
        let layout = self.layout(&forest);
        let svg = export::svg::render(&forest, &layout, &people, self.config.style())?;
        Ok(svg)
    }

    /// Builds, lays out and serializes a snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FamTreeError::Export`] if serialization fails.
    pub fn render_json(&self, snapshot: &FamilySnapshot) -> Result<String, FamTreeError> {
        let forest = self.build(snapshot);
        let layout = self.layout(&forest);
        let json = export::json::render(&forest, &layout)?;
        Ok(json)
    }
}
