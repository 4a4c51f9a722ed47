//! Cell builder: turns people and relations into a forest of cells.
//!
//! A *cell* is the unit drawn on the chart: one person, or a couple merged
//! into a single box. Cells are linked parent to child, and every cell is
//! given a generation (its depth) and a rank (its position among the cells of
//! that generation in depth-first visitation order).
//!
//! # Pipeline
//!
//! ```text
//! people + relations
//!     ↓ policy::resolve_parents / policy::resolve_spouses
//! chosen parent per child, chosen spouse per person
//!     ↓ couples first, then singles
//! cells
//!     ↓ wire parent → child at cell granularity
//! forest (roots = cells without parent)
//!     ↓ depth-first walk, alphabetical
//! generation + rank
//! ```
//!
//! The builder never fails: ids missing from the people map are skipped and
//! conflicting links are settled by the [`policy`](crate::policy) functions.

use std::{cmp::Ordering, collections::HashMap, fmt, mem};

use indexmap::IndexMap;
use log::{debug, info, trace};
use serde::{Serialize, Serializer};

use famtree_core::{collation::compare_names, identifier::PersonId, model::Relation};

use crate::{policy, snapshot::PeopleById};

/// Stable identifier of a cell.
///
/// Displayed as `person:<id>` for singles and `couple:<min>-<max>` for
/// couples, where the pair is ordered by id so the same couple gets the same
/// id whichever direction its spouse edge was stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellId {
    Single(PersonId),
    Couple(PersonId, PersonId),
}

impl CellId {
    /// Canonical couple id for two people, in either order.
    ///
    /// # Examples
    ///
    /// ```
    /// use famtree::cells::CellId;
    /// use famtree_core::identifier::PersonId;
    ///
    /// let a = PersonId::new("A");
    /// let b = PersonId::new("B");
    ///
    /// assert_eq!(CellId::couple(b, a), CellId::couple(a, b));
    /// assert_eq!(CellId::couple(b, a).to_string(), "couple:A-B");
    /// assert_eq!(CellId::Single(a).to_string(), "person:A");
    /// ```
    pub fn couple(a: PersonId, b: PersonId) -> Self {
        let (min, max) = a.ordered_with(b);
        Self::Couple(min, max)
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Self::Single(_) => CellKind::Single,
            Self::Couple(..) => CellKind::Couple,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(id) => write!(f, "person:{id}"),
            Self::Couple(a, b) => write!(f, "couple:{a}-{b}"),
        }
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Single,
    Couple,
}

/// A positioned-to-be unit of the family tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    id: CellId,
    members: Vec<PersonId>,
    label: String,
    parent_cell: Option<CellId>,
    child_cells: Vec<CellId>,
    generation: usize,
    rank: usize,
}

impl Cell {
    fn new(id: CellId, members: Vec<PersonId>, people: &PeopleById) -> Self {
        let label = members
            .iter()
            .map(|member| {
                people
                    .get(member)
                    .map(|person| person.display_name())
                    .unwrap_or_else(|| member.to_string())
            })
            .collect::<Vec<_>>()
            .join(" & ");

        Self {
            id,
            members,
            label,
            parent_cell: None,
            child_cells: Vec::new(),
            generation: 0,
            rank: 0,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn kind(&self) -> CellKind {
        self.id.kind()
    }

    /// One id for a single, two ids sorted ascending for a couple.
    pub fn members(&self) -> &[PersonId] {
        &self.members
    }

    /// Representative name: member display names joined with ` & `.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The cell holding the chosen parent, `None` for roots.
    pub fn parent_cell(&self) -> Option<CellId> {
        self.parent_cell
    }

    /// Child cells in alphabetical order of their labels.
    pub fn child_cells(&self) -> &[CellId] {
        &self.child_cells
    }

    pub fn is_root(&self) -> bool {
        self.parent_cell.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_cells.is_empty()
    }

    /// Depth from the root of this cell's tree.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Position among the cells of the same generation, in visitation order.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Orders cells by label, then by id.
fn compare_cells(lhs: &Cell, rhs: &Cell) -> Ordering {
    compare_names(&lhs.label, &rhs.label).then_with(|| lhs.id.cmp(&rhs.id))
}

/// The complete cell structure built from one snapshot.
#[derive(Debug, Clone, Default)]
pub struct CellForest {
    cells: IndexMap<CellId, Cell>,
    roots: Vec<CellId>,
    owners: HashMap<PersonId, CellId>,
    active_user: Option<PersonId>,
}

impl CellForest {
    /// Iterates cells in creation order: couples first, then singles.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    /// Root cells in alphabetical order of their labels.
    pub fn roots(&self) -> &[CellId] {
        &self.roots
    }

    /// The cell a person was placed in.
    pub fn cell_of(&self, person: PersonId) -> Option<CellId> {
        self.owners.get(&person).copied()
    }

    pub fn active_user(&self) -> Option<PersonId> {
        self.active_user
    }

    /// The cell holding the active user, if they are part of the snapshot.
    pub fn active_cell(&self) -> Option<CellId> {
        self.active_user.and_then(|person| self.cell_of(person))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of generations in the deepest tree.
    pub fn generation_count(&self) -> usize {
        self.cells()
            .map(|cell| cell.generation + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns true if `ancestor` is `cell` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: CellId, cell: CellId) -> bool {
        let mut current = Some(cell);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.cells.get(&id).and_then(|cell| cell.parent_cell);
        }
        false
    }
}

/// Builds the cell forest for one snapshot.
///
/// `active_user` does not influence the structure; it is carried along so
/// renderers can highlight the signed-in member.
///
/// # Examples
///
/// ```
/// use famtree::{cells::{build_cells, CellId}, FamilySnapshot};
/// use famtree_core::{identifier::PersonId, model::{Person, Relation}};
///
/// let snapshot = FamilySnapshot::new(
///     vec![Person::named("A", "Alice"), Person::named("B", "Bob"), Person::named("C", "Carla")],
///     vec![Relation::spouse("A", "B"), Relation::spouse("B", "A"), Relation::parent("A", "C")],
/// );
///
/// let forest = build_cells(None, &snapshot.people_by_id(), &snapshot.relations);
/// let couple = CellId::couple(PersonId::new("A"), PersonId::new("B"));
/// let carla = CellId::Single(PersonId::new("C"));
///
/// assert_eq!(forest.roots(), &[couple]);
/// assert_eq!(forest.get(carla).unwrap().parent_cell(), Some(couple));
/// assert_eq!(forest.get(carla).unwrap().generation(), 1);
/// ```
pub fn build_cells(
    active_user: Option<PersonId>,
    people: &PeopleById,
    relations: &[Relation],
) -> CellForest {
    let parents = policy::resolve_parents(people, relations);
    let spouses = policy::resolve_spouses(people, relations);

    let mut forest = CellForest {
        active_user,
        ..CellForest::default()
    };

    create_couples(&mut forest, people, &spouses);
    create_singles(&mut forest, people);
    wire_parents(&mut forest, &parents);

    forest.roots = forest
        .cells
        .values()
        .filter(|cell| cell.is_root())
        .map(Cell::id)
        .collect();

    assign_generations(&mut forest);

    info!(
        people = people.len(),
        cells = forest.len(),
        roots = forest.roots.len();
        "Cells built"
    );

    forest
}

fn insert_cell(forest: &mut CellForest, cell: Cell) {
    for member in &cell.members {
        forest.owners.insert(*member, cell.id);
    }
    trace!(cell_id:% = cell.id, label = cell.label.as_str(); "Cell created");
    forest.cells.insert(cell.id, cell);
}

fn create_couples(forest: &mut CellForest, people: &PeopleById, spouses: &policy::SpouseChoices) {
    for &person in people.keys() {
        let Some(&spouse) = spouses.get(&person) else {
            continue;
        };
        if forest.owners.contains_key(&person) || forest.owners.contains_key(&spouse) {
            continue;
        }

        let (min, max) = person.ordered_with(spouse);
        let cell = Cell::new(CellId::couple(person, spouse), vec![min, max], people);
        insert_cell(forest, cell);
    }
}

fn create_singles(forest: &mut CellForest, people: &PeopleById) {
    for &person in people.keys() {
        if forest.owners.contains_key(&person) {
            continue;
        }
        let cell = Cell::new(CellId::Single(person), vec![person], people);
        insert_cell(forest, cell);
    }
}

/// Links parent cells to child cells.
///
/// A child cell keeps its first parent cell. Later links to a different
/// parent cell, links from a cell to itself and links that would close a
/// cycle are dropped so the result stays a forest.
fn wire_parents(forest: &mut CellForest, parents: &policy::ParentChoices) {
    for (&child, &parent) in parents {
        let (Some(child_cell), Some(parent_cell)) = (forest.cell_of(child), forest.cell_of(parent))
        else {
            continue;
        };

        if let Some(existing) = forest.cells[&child_cell].parent_cell {
            if existing != parent_cell {
                debug!(
                    child_cell:% = child_cell,
                    kept:% = existing,
                    dropped:% = parent_cell;
                    "Second parent cell ignored"
                );
            }
            continue;
        }

        if forest.is_ancestor_or_self(child_cell, parent_cell) {
            debug!(
                child_cell:% = child_cell,
                parent_cell:% = parent_cell;
                "Parent link would close a cycle, ignored"
            );
            continue;
        }

        forest.cells[&child_cell].parent_cell = Some(parent_cell);
        let children = &mut forest.cells[&parent_cell].child_cells;
        if !children.contains(&child_cell) {
            children.push(child_cell);
        }
    }
}

/// Sorts roots and children alphabetically, then walks every tree depth
/// first assigning generation and rank.
fn assign_generations(forest: &mut CellForest) {
    let ids: Vec<CellId> = forest.cells.keys().copied().collect();
    for id in ids {
        let mut children = mem::take(&mut forest.cells[&id].child_cells);
        children.sort_by(|lhs, rhs| compare_cells(&forest.cells[lhs], &forest.cells[rhs]));
        forest.cells[&id].child_cells = children;
    }

    let mut roots = mem::take(&mut forest.roots);
    roots.sort_by(|lhs, rhs| compare_cells(&forest.cells[lhs], &forest.cells[rhs]));
    forest.roots = roots;

    let mut next_rank: Vec<usize> = Vec::new();
    let mut stack: Vec<(CellId, usize)> = forest.roots.iter().rev().map(|&id| (id, 0)).collect();

    while let Some((id, depth)) = stack.pop() {
        if next_rank.len() <= depth {
            next_rank.resize(depth + 1, 0);
        }
        let rank = next_rank[depth];
        next_rank[depth] += 1;

        let cell = &mut forest.cells[&id];
        cell.generation = depth;
        cell.rank = rank;
        stack.extend(cell.child_cells.iter().rev().map(|&child| (child, depth + 1)));
    }

    debug!(generations = next_rank.len(); "Generations assigned");
}
