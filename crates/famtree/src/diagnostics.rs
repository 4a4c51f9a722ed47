//! Relation diagnostics.
//!
//! The cell builder silently settles conflicting data. Callers that want to
//! tell members *why* a relative is missing from the chart can run
//! [`inspect`] on the same input and report the returned issues.

use std::{collections::HashSet, fmt};

use famtree_core::{identifier::PersonId, model::Relation};

use crate::{policy, snapshot::PeopleById};

/// A data-quality finding about the relations of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationIssue {
    /// The relation names an id that is not in the people set.
    UnknownPerson {
        relation: Relation,
        missing: PersonId,
    },
    /// The relation names the same person on both ends.
    SelfRelation { relation: Relation },
    /// The same link was stored more than once (in either direction).
    DuplicateRelation { relation: Relation },
    /// A child has another parent than the one kept in the tree.
    ExtraParent {
        child: PersonId,
        kept: PersonId,
        dropped: PersonId,
    },
    /// A person has several spouse candidates; only one is kept.
    ExtraSpouse {
        person: PersonId,
        chosen: PersonId,
        others: Vec<PersonId>,
    },
}

impl fmt::Display for RelationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPerson { relation, missing } => write!(
                f,
                "{} relation {} → {} names unknown person {missing}",
                relation.relationship_type, relation.user_id, relation.related_user_id
            ),
            Self::SelfRelation { relation } => write!(
                f,
                "{} relation links {} to themselves",
                relation.relationship_type, relation.user_id
            ),
            Self::DuplicateRelation { relation } => write!(
                f,
                "{} relation {} → {} is declared more than once",
                relation.relationship_type, relation.user_id, relation.related_user_id
            ),
            Self::ExtraParent {
                child,
                kept,
                dropped,
            } => write!(
                f,
                "{child} has parents {kept} and {dropped}; only {kept} is shown"
            ),
            Self::ExtraSpouse {
                person,
                chosen,
                others,
            } => {
                let others = others
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "{person} has several spouses; {chosen} is shown, not {others}"
                )
            }
        }
    }
}

/// Normalized identity of a link, used to spot duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LinkKey {
    Parent(PersonId, PersonId),
    Spouse(PersonId, PersonId),
}

impl LinkKey {
    fn of(relation: &Relation) -> Self {
        match relation.parent_link() {
            Some((parent, child)) => Self::Parent(parent, child),
            None => {
                let (a, b) = relation.user_id.ordered_with(relation.related_user_id);
                Self::Spouse(a, b)
            }
        }
    }
}

/// Lists every relation the cell builder will ignore or override.
///
/// Issues are reported in relation order, followed by parent conflicts and
/// spouse conflicts.
///
/// # Examples
///
/// ```
/// use famtree::{diagnostics::{inspect, RelationIssue}, FamilySnapshot};
/// use famtree_core::model::{Person, Relation};
///
/// let snapshot = FamilySnapshot::new(
///     vec![Person::named("a", "Ann"), Person::named("b", "Ben")],
///     vec![Relation::spouse("a", "b"), Relation::spouse("b", "a"), Relation::parent("a", "z")],
/// );
///
/// let issues = inspect(&snapshot.people_by_id(), &snapshot.relations);
/// assert_eq!(issues.len(), 2);
/// assert!(matches!(issues[0], RelationIssue::DuplicateRelation { .. }));
/// assert!(matches!(issues[1], RelationIssue::UnknownPerson { .. }));
/// ```
pub fn inspect(people: &PeopleById, relations: &[Relation]) -> Vec<RelationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for relation in relations {
        if let Some(missing) = [relation.user_id, relation.related_user_id]
            .into_iter()
            .find(|id| !people.contains_key(id))
        {
            issues.push(RelationIssue::UnknownPerson {
                relation: *relation,
                missing,
            });
            continue;
        }
        if relation.is_self_relation() {
            issues.push(RelationIssue::SelfRelation {
                relation: *relation,
            });
            continue;
        }
        if !seen.insert(LinkKey::of(relation)) {
            issues.push(RelationIssue::DuplicateRelation {
                relation: *relation,
            });
        }
    }

    let parents = policy::resolve_parents(people, relations);
    let mut reported = HashSet::new();
    for (parent, child) in relations.iter().filter_map(Relation::parent_link) {
        let Some(&kept) = parents.get(&child) else {
            continue;
        };
        if kept != parent && people.contains_key(&parent) && reported.insert((child, parent)) {
            issues.push(RelationIssue::ExtraParent {
                child,
                kept,
                dropped: parent,
            });
        }
    }

    for (person, candidates) in policy::spouse_candidates(people, relations) {
        if candidates.len() < 2 {
            continue;
        }
        let Some(chosen) = policy::pick_spouse(people, &candidates) else {
            continue;
        };
        issues.push(RelationIssue::ExtraSpouse {
            person,
            chosen,
            others: candidates
                .into_iter()
                .filter(|&candidate| candidate != chosen)
                .collect(),
        });
    }

    issues
}
