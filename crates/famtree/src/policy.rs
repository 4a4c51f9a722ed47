//! Tie-break policies for conflicting family data.
//!
//! Real profile data routinely names two parents for a child or several
//! spouses for one person. The tree has room for one parent link per child and
//! one spouse per person, so these functions decide which one survives:
//!
//! - [`resolve_parents`]: the first parent edge seen for a child wins.
//! - [`pick_spouse`]: the candidate whose display name sorts first wins.
//!
//! Edges that name an id missing from the people map, or the same id on both
//! ends, are ignored by every policy.

use std::cmp::Ordering;

use indexmap::IndexMap;

use famtree_core::{collation::compare_names, identifier::PersonId, model::Relation};

use crate::snapshot::PeopleById;

/// Mapping from child to its chosen parent, in resolution order.
pub type ParentChoices = IndexMap<PersonId, PersonId>;

/// Mapping from person to its chosen spouse, in people order.
pub type SpouseChoices = IndexMap<PersonId, PersonId>;

/// Returns true if both ends of the link are known people and distinct.
fn is_usable_link(people: &PeopleById, a: PersonId, b: PersonId) -> bool {
    a != b && people.contains_key(&a) && people.contains_key(&b)
}

/// Chooses one parent per child.
///
/// `parent(p, c)` and `child(c, p)` both propose `p` as parent of `c`; the
/// first proposal in relation order is kept and later ones are dropped.
///
/// # Examples
///
/// ```
/// use famtree::{policy::resolve_parents, FamilySnapshot};
/// use famtree_core::{identifier::PersonId, model::{Person, Relation}};
///
/// let snapshot = FamilySnapshot::new(
///     vec![Person::named("mum", "Mum"), Person::named("dad", "Dad"), Person::named("kid", "Kid")],
///     vec![Relation::child("kid", "dad"), Relation::parent("mum", "kid")],
/// );
///
/// let parents = resolve_parents(&snapshot.people_by_id(), &snapshot.relations);
/// assert_eq!(parents[&PersonId::new("kid")], PersonId::new("dad"));
/// ```
pub fn resolve_parents(people: &PeopleById, relations: &[Relation]) -> ParentChoices {
    let mut chosen = ParentChoices::new();
    for (parent, child) in relations.iter().filter_map(Relation::parent_link) {
        if !is_usable_link(people, parent, child) {
            continue;
        }
        chosen.entry(child).or_insert(parent);
    }
    chosen
}

/// Collects spouse candidates for every person, in both directions.
///
/// Each candidate appears once per person, in the order first seen.
pub fn spouse_candidates(
    people: &PeopleById,
    relations: &[Relation],
) -> IndexMap<PersonId, Vec<PersonId>> {
    let mut candidates: IndexMap<PersonId, Vec<PersonId>> = IndexMap::new();
    for (a, b) in relations.iter().filter_map(Relation::spouse_link) {
        if !is_usable_link(people, a, b) {
            continue;
        }
        for (person, spouse) in [(a, b), (b, a)] {
            let list = candidates.entry(person).or_default();
            if !list.contains(&spouse) {
                list.push(spouse);
            }
        }
    }
    candidates
}

/// Orders two people by display name, falling back to id order.
pub fn compare_people(people: &PeopleById, lhs: PersonId, rhs: PersonId) -> Ordering {
    let name = |id: PersonId| {
        people
            .get(&id)
            .map(|person| person.display_name())
            .unwrap_or_else(|| id.to_string())
    };
    compare_names(&name(lhs), &name(rhs)).then_with(|| lhs.cmp(&rhs))
}

/// Picks the candidate whose display name sorts first.
///
/// Returns `None` for an empty candidate list.
pub fn pick_spouse(people: &PeopleById, candidates: &[PersonId]) -> Option<PersonId> {
    candidates
        .iter()
        .copied()
        .min_by(|&lhs, &rhs| compare_people(people, lhs, rhs))
}

/// Chooses at most one spouse per person.
///
/// The choice is made independently for every person: `a` may choose `b`
/// while `b` chooses `c`. The cell builder settles such disagreements by
/// merging whichever couple it reaches first.
pub fn resolve_spouses(people: &PeopleById, relations: &[Relation]) -> SpouseChoices {
    let candidates = spouse_candidates(people, relations);
    people
        .keys()
        .filter_map(|&person| {
            let list = candidates.get(&person)?;
            pick_spouse(people, list).map(|spouse| (person, spouse))
        })
        .collect()
}
