//! Input snapshots: the people and relations read from the profile store.

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use famtree_core::{
    identifier::PersonId,
    model::{Person, Relation},
};

use crate::FamTreeError;

/// Insertion-ordered mapping from id to person.
pub type PeopleById = IndexMap<PersonId, Person>;

/// Serialization format of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Picks the format from a file extension (`.json` or `.toml`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// One consistent read of the family data.
///
/// # Examples
///
/// ```
/// use famtree::FamilySnapshot;
///
/// let snapshot = FamilySnapshot::from_json(
///     r#"{
///         "active_user_id": "a",
///         "people": [{"id": "a", "full_name": "Alice"}, {"id": "c", "full_name": "Carla"}],
///         "relations": [{"user_id": "a", "related_user_id": "c", "relationship_type": "parent"}]
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(snapshot.people.len(), 2);
/// assert_eq!(snapshot.people_by_id().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilySnapshot {
    /// Signed-in member, highlighted when rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_user_id: Option<PersonId>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl FamilySnapshot {
    pub fn new(people: Vec<Person>, relations: Vec<Relation>) -> Self {
        Self {
            active_user_id: None,
            people,
            relations,
        }
    }

    pub fn with_active_user(mut self, id: impl Into<PersonId>) -> Self {
        self.active_user_id = Some(id.into());
        self
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FamTreeError::Input`] if the document is not valid JSON or
    /// does not match the snapshot shape (for example an unknown
    /// relationship type).
    pub fn from_json(source: &str) -> Result<Self, FamTreeError> {
        serde_json::from_str(source)
            .map_err(|err| FamTreeError::Input(format!("invalid JSON snapshot: {err}")))
    }

    /// Parses a snapshot from TOML (`[[people]]` and `[[relations]]` tables).
    ///
    /// # Errors
    ///
    /// Returns [`FamTreeError::Input`] if the document cannot be decoded.
    pub fn from_toml(source: &str) -> Result<Self, FamTreeError> {
        toml::from_str(source)
            .map_err(|err| FamTreeError::Input(format!("invalid TOML snapshot: {err}")))
    }

    /// Parses a snapshot in the given format.
    pub fn parse(source: &str, format: InputFormat) -> Result<Self, FamTreeError> {
        match format {
            InputFormat::Json => Self::from_json(source),
            InputFormat::Toml => Self::from_toml(source),
        }
    }

    /// Indexes people by id, keeping input order.
    ///
    /// A repeated id keeps its first record; later duplicates are logged and
    /// dropped.
    pub fn people_by_id(&self) -> PeopleById {
        let mut people = PeopleById::with_capacity(self.people.len());
        for person in &self.people {
            if people.contains_key(&person.id) {
                warn!(person_id:% = person.id; "Duplicate person record ignored");
                continue;
            }
            people.insert(person.id, person.clone());
        }
        debug!(people = people.len(), relations = self.relations.len(); "Indexed snapshot");
        people
    }
}
