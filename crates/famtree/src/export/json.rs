//! JSON export of cell structure and geometry.
//!
//! The document is meant for renderers that draw the chart themselves (the
//! mobile client, for instance) and only need the computed positions.

use log::info;
use serde::Serialize;

use famtree_core::identifier::PersonId;

use crate::{
    cells::{CellForest, CellId, CellKind},
    export::Error,
    layout::Layout,
};

#[derive(Debug, Serialize)]
struct LayoutDocument<'a> {
    active_user: Option<PersonId>,
    roots: &'a [CellId],
    width: f32,
    height: f32,
    cells: Vec<CellRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct CellRecord<'a> {
    id: CellId,
    kind: CellKind,
    label: &'a str,
    members: &'a [PersonId],
    parent: Option<CellId>,
    children: &'a [CellId],
    generation: usize,
    rank: usize,
    center_x: f32,
    top_y: f32,
    width: f32,
    subtree_min: f32,
    subtree_max: f32,
}

/// Serializes every laid-out cell, in placement order, as pretty JSON.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn render(forest: &CellForest, layout: &Layout) -> Result<String, Error> {
    let cells: Vec<CellRecord<'_>> = layout
        .iter()
        .filter_map(|(id, geometry)| {
            let cell = forest.get(id)?;
            Some(CellRecord {
                id,
                kind: cell.kind(),
                label: cell.label(),
                members: cell.members(),
                parent: cell.parent_cell(),
                children: cell.child_cells(),
                generation: cell.generation(),
                rank: cell.rank(),
                center_x: geometry.center_x(),
                top_y: geometry.top_y(),
                width: geometry.footprint(),
                subtree_min: geometry.subtree().min(),
                subtree_max: geometry.subtree().max(),
            })
        })
        .collect();

    let bounds = layout.bounds();
    let document = LayoutDocument {
        active_user: forest.active_user(),
        roots: forest.roots(),
        width: bounds.max_x() + bounds.min_x().max(0.0),
        height: bounds.max_y() + bounds.min_y().max(0.0),
        cells,
    };

    let json = serde_json::to_string_pretty(&document)?;
    info!(cells = document.cells.len(); "JSON layout rendered");
    Ok(json)
}
