//! Subtree layout for the cell forest.
//!
//! Every subtree is placed in its own coordinates first, starting at zero:
//!
//! - a leaf occupies `[0, footprint]` and is centered on that interval;
//! - an internal cell lays its children out left to right, translating each
//!   child subtree so consecutive subtree intervals are exactly one
//!   `sibling_gap` apart, then centers itself over the children's span. Its
//!   subtree interval is the union of its own footprint and that span.
//!
//! Each finished root subtree is then translated into place (see
//! [`RootPlacement`]). Vertical position depends on the generation only.
//!
//! The forest is never modified; geometry is returned as a separate
//! [`Layout`] so the same forest can be laid out with several configurations.

use indexmap::IndexMap;
use log::{debug, info};

use famtree_core::{
    geometry::{Bounds, Interval, Point, Size},
    identifier::PersonId,
};

use crate::{
    cells::{Cell, CellForest, CellId},
    config::{LayoutConfig, RootPlacement},
};

/// Geometry of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    footprint: f32,
    center_x: f32,
    top_y: f32,
    subtree: Interval,
}

impl CellGeometry {
    /// Horizontal space taken by the cell's card(s).
    pub fn footprint(&self) -> f32 {
        self.footprint
    }

    /// Horizontal anchor: the center of the cell.
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    /// Top edge of the cell's row.
    pub fn top_y(&self) -> f32 {
        self.top_y
    }

    /// Horizontal extent of the cell's own footprint.
    pub fn own_interval(&self) -> Interval {
        Interval::centered(self.center_x, self.footprint)
    }

    /// Horizontal extent of the cell and all of its descendants.
    pub fn subtree(&self) -> Interval {
        self.subtree
    }

    fn translate(&mut self, offset: f32) {
        self.center_x += offset;
        self.subtree = self.subtree.translate(offset);
    }
}

/// Positioned cells, keyed by cell id.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    cells: IndexMap<CellId, CellGeometry>,
    card_size: Size,
    couple_gap: f32,
    bounds: Bounds,
}

impl Layout {
    pub fn get(&self, id: CellId) -> Option<&CellGeometry> {
        self.cells.get(&id)
    }

    /// Iterates cells in placement order (depth first, roots in order).
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &CellGeometry)> {
        self.cells.iter().map(|(id, geometry)| (*id, geometry))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn card_size(&self) -> Size {
        self.card_size
    }

    /// Smallest rectangle covering every card, or empty bounds at the origin.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Rectangle covering a cell's card(s).
    pub fn cell_bounds(&self, id: CellId) -> Option<Bounds> {
        self.get(id).map(|geometry| {
            let left = geometry.center_x - geometry.footprint / 2.0;
            Bounds::new_from_top_left(
                Point::new(left, geometry.top_y),
                Size::new(geometry.footprint, self.card_size.height()),
            )
        })
    }

    /// One card rectangle per member, left to right in member order.
    pub fn member_cards(&self, cell: &Cell) -> Vec<(PersonId, Bounds)> {
        let Some(geometry) = self.get(cell.id()) else {
            return Vec::new();
        };

        let left = geometry.center_x - geometry.footprint / 2.0;
        let stride = self.card_size.width() + self.couple_gap;
        cell.members()
            .iter()
            .enumerate()
            .map(|(index, &member)| {
                let top_left = Point::new(left + index as f32 * stride, geometry.top_y);
                (member, Bounds::new_from_top_left(top_left, self.card_size))
            })
            .collect()
    }
}

/// Layout engine for cell forests.
///
/// # Examples
///
/// ```
/// use famtree::{cells::{build_cells, CellId}, config::LayoutConfig, layout::LayoutEngine, FamilySnapshot};
/// use famtree_core::{identifier::PersonId, model::{Person, Relation}};
///
/// let snapshot = FamilySnapshot::new(
///     vec![Person::named("p", "Pat"), Person::named("k", "Kim")],
///     vec![Relation::parent("p", "k")],
/// );
/// let forest = build_cells(None, &snapshot.people_by_id(), &snapshot.relations);
///
/// let config = LayoutConfig::default().with_margin(10.0).with_row_height(100.0);
/// let layout = LayoutEngine::new(config).layout(&forest);
///
/// let parent = layout.get(CellId::Single(PersonId::new("p"))).unwrap();
/// let child = layout.get(CellId::Single(PersonId::new("k"))).unwrap();
/// assert_eq!(parent.center_x(), child.center_x());
/// assert_eq!(child.top_y() - parent.top_y(), 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// The configuration is expected to hold finite, non-negative spacings
    /// and positive card sizes, as checked by [`AppConfig::validate`].
    ///
    /// [`AppConfig::validate`]: crate::config::AppConfig::validate
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Computes geometry for every cell reachable from the forest's roots.
    pub fn layout(&self, forest: &CellForest) -> Layout {
        let mut cells = IndexMap::with_capacity(forest.len());
        let margin = self.config.margin();
        let mut cursor = margin;

        for &root in forest.roots() {
            let subtree = self.place_subtree(forest, root, &mut cells);

            let target = match self.config.root_placement() {
                RootPlacement::SideBySide => cursor,
                RootPlacement::Overlap => margin,
            };
            Self::translate_subtree(forest, root, target - subtree.min(), &mut cells);
            cursor = target + subtree.width() + self.config.block_gap();

            debug!(
                root:% = root,
                left = target,
                width = subtree.width();
                "Root subtree placed"
            );
        }

        let card_size = Size::new(self.config.card_width(), self.config.card_height());
        let mut layout = Layout {
            cells,
            card_size,
            couple_gap: self.config.couple_gap(),
            bounds: Bounds::default(),
        };
        layout.bounds = layout
            .cells
            .keys()
            .filter_map(|&id| layout.cell_bounds(id))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();

        info!(
            cells = layout.len(),
            width = layout.bounds.width(),
            height = layout.bounds.height();
            "Layout calculated"
        );

        layout
    }

    /// Places a subtree in coordinates starting at zero and returns its
    /// interval.
    fn place_subtree(
        &self,
        forest: &CellForest,
        id: CellId,
        cells: &mut IndexMap<CellId, CellGeometry>,
    ) -> Interval {
        let Some(cell) = forest.get(id) else {
            return Interval::default();
        };
        let footprint = self.config.footprint(cell.members().len());
        let top_y = self.config.margin() + cell.generation() as f32 * self.config.row_height();

        // Reserve the slot first so geometry is stored in pre-order.
        cells.insert(
            id,
            CellGeometry {
                footprint,
                center_x: 0.0,
                top_y,
                subtree: Interval::default(),
            },
        );

        let mut span: Option<Interval> = None;
        let mut cursor = 0.0;
        for &child in cell.child_cells() {
            let child_interval = self.place_subtree(forest, child, cells);
            let offset = cursor - child_interval.min();
            Self::translate_subtree(forest, child, offset, cells);

            let placed = child_interval.translate(offset);
            span = Some(span.map_or(placed, |span| span.merge(placed)));
            cursor = placed.max() + self.config.sibling_gap();
        }

        let (center_x, subtree) = match span {
            None => (footprint / 2.0, Interval::new(0.0, footprint)),
            Some(span) => {
                let center = span.center();
                (center, Interval::centered(center, footprint).merge(span))
            }
        };

        if let Some(geometry) = cells.get_mut(&id) {
            geometry.center_x = center_x;
            geometry.subtree = subtree;
        }
        subtree
    }

    fn translate_subtree(
        forest: &CellForest,
        id: CellId,
        offset: f32,
        cells: &mut IndexMap<CellId, CellGeometry>,
    ) {
        if offset == 0.0 {
            return;
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(geometry) = cells.get_mut(&current) {
                geometry.translate(offset);
            }
            if let Some(cell) = forest.get(current) {
                pending.extend_from_slice(cell.child_cells());
            }
        }
    }
}
