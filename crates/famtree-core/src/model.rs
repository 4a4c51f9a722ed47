//! People and pairwise relations as supplied by the profile store.
//!
//! These types mirror the rows the host application keeps for profiles and
//! family links. They are plain input data: the layout engine reads them and
//! never mutates them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::PersonId;

/// A member of the household, identified by an opaque id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, full_name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.map(str::to_string),
        }
    }

    /// Shorthand for a person with a full name.
    pub fn named(id: impl Into<PersonId>, full_name: &str) -> Self {
        Self::new(id, Some(full_name))
    }

    /// Name shown on the chart and used for every alphabetical tie-break.
    ///
    /// Falls back to the id when the full name is missing or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use famtree_core::model::Person;
    ///
    /// assert_eq!(Person::named("p1", "Alice Martin").display_name(), "Alice Martin");
    /// assert_eq!(Person::new("p2", Some("  ")).display_name(), "p2");
    /// assert_eq!(Person::new("p3", None).display_name(), "p3");
    /// ```
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.id.to_string(),
        }
    }
}

/// Kind of family link carried by a [`Relation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    /// `user_id` is a parent of `related_user_id`.
    Parent,
    /// `user_id` is a child of `related_user_id`.
    Child,
    /// The two people are spouses; direction carries no meaning.
    Spouse,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Spouse => "spouse",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown relationship type `{0}`, expected one of: parent, child, spouse")]
pub struct UnknownRelationshipType(String);

impl FromStr for RelationshipType {
    type Err = UnknownRelationshipType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            "spouse" => Ok(Self::Spouse),
            _ => Err(UnknownRelationshipType(s.to_string())),
        }
    }
}

/// A directed family edge as kept by the profile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub user_id: PersonId,
    pub related_user_id: PersonId,
    pub relationship_type: RelationshipType,
}

impl Relation {
    pub fn new(
        user_id: impl Into<PersonId>,
        related_user_id: impl Into<PersonId>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            related_user_id: related_user_id.into(),
            relationship_type,
        }
    }

    /// `parent` is a parent of `child`.
    pub fn parent(parent: impl Into<PersonId>, child: impl Into<PersonId>) -> Self {
        Self::new(parent, child, RelationshipType::Parent)
    }

    /// `child` is a child of `parent`.
    pub fn child(child: impl Into<PersonId>, parent: impl Into<PersonId>) -> Self {
        Self::new(child, parent, RelationshipType::Child)
    }

    pub fn spouse(a: impl Into<PersonId>, b: impl Into<PersonId>) -> Self {
        Self::new(a, b, RelationshipType::Spouse)
    }

    /// Returns `(parent, child)` for parent and child edges, normalizing the
    /// direction of `child` edges. Returns `None` for spouse edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use famtree_core::{identifier::PersonId, model::Relation};
    ///
    /// let mum = PersonId::new("mum");
    /// let kid = PersonId::new("kid");
    ///
    /// assert_eq!(Relation::parent(mum, kid).parent_link(), Some((mum, kid)));
    /// assert_eq!(Relation::child(kid, mum).parent_link(), Some((mum, kid)));
    /// assert_eq!(Relation::spouse(mum, kid).parent_link(), None);
    /// ```
    pub fn parent_link(&self) -> Option<(PersonId, PersonId)> {
        match self.relationship_type {
            RelationshipType::Parent => Some((self.user_id, self.related_user_id)),
            RelationshipType::Child => Some((self.related_user_id, self.user_id)),
            RelationshipType::Spouse => None,
        }
    }

    /// Returns both endpoints for spouse edges.
    pub fn spouse_link(&self) -> Option<(PersonId, PersonId)> {
        match self.relationship_type {
            RelationshipType::Spouse => Some((self.user_id, self.related_user_id)),
            _ => None,
        }
    }

    /// Returns true if the edge names the same person on both ends.
    pub fn is_self_relation(&self) -> bool {
        self.user_id == self.related_user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_type_from_str() {
        assert_eq!("parent".parse::<RelationshipType>(), Ok(RelationshipType::Parent));
        assert_eq!(" Child ".parse::<RelationshipType>(), Ok(RelationshipType::Child));
        assert_eq!("SPOUSE".parse::<RelationshipType>(), Ok(RelationshipType::Spouse));
        assert!("sibling".parse::<RelationshipType>().is_err());
    }

    #[test]
    fn test_relationship_type_serde_lowercase() {
        let json = serde_json::to_string(&RelationshipType::Spouse).unwrap();
        assert_eq!(json, "\"spouse\"");

        let parsed: RelationshipType = serde_json::from_str("\"child\"").unwrap();
        assert_eq!(parsed, RelationshipType::Child);
    }

    #[test]
    fn test_relation_deserialize() {
        let relation: Relation = serde_json::from_str(
            r#"{"user_id": "u1", "related_user_id": "u2", "relationship_type": "parent"}"#,
        )
        .unwrap();

        assert_eq!(relation, Relation::parent("u1", "u2"));
        assert!(!relation.is_self_relation());
    }

    #[test]
    fn test_person_deserialize_without_name() {
        let person: Person = serde_json::from_str(r#"{"id": "u9"}"#).unwrap();
        assert_eq!(person.full_name, None);
        assert_eq!(person.display_name(), "u9");
    }

    #[test]
    fn test_spouse_link() {
        let relation = Relation::spouse("s1", "s2");
        assert_eq!(
            relation.spouse_link(),
            Some((PersonId::new("s1"), PersonId::new("s2")))
        );
        assert_eq!(Relation::parent("s1", "s2").spouse_link(), None);
    }
}
