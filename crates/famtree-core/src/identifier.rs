//! Person identifiers backed by a process-wide string interner.
//!
//! This module provides the [`PersonId`] type. Identifiers coming from the
//! profile store are opaque strings (usually UUIDs); interning them makes
//! copies, hashing and equality checks cheap while still ordering ids by
//! their string value, which the canonical couple id relies on.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Serialize};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for person identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Opaque identifier of a person.
///
/// Equality and hashing work on the interned symbol; ordering compares the
/// underlying strings lexicographically.
///
/// # Examples
///
/// ```
/// use famtree_core::identifier::PersonId;
///
/// let alice = PersonId::new("a1");
/// let bob = PersonId::new("b2");
///
/// assert!(alice < bob);
/// assert_eq!(alice, "a1");
/// assert_eq!(alice.to_string(), "a1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PersonId(DefaultSymbol);

impl PersonId {
    /// Creates a `PersonId` from a string slice, interning it on first use.
    pub fn new(id: &str) -> Self {
        Self(interner().get_or_intern(id))
    }

    /// Returns the pair `(self, other)` ordered ascending by string value.
    ///
    /// # Examples
    ///
    /// ```
    /// use famtree_core::identifier::PersonId;
    ///
    /// let a = PersonId::new("a");
    /// let b = PersonId::new("b");
    /// assert_eq!(b.ordered_with(a), (a, b));
    /// ```
    pub fn ordered_with(self, other: PersonId) -> (PersonId, PersonId) {
        if self <= other {
            (self, other)
        } else {
            (other, self)
        }
    }
}

impl Ord for PersonId {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        let interner = interner();
        let lhs = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        let rhs = interner
            .resolve(other.0)
            .expect("Symbol should exist in interner");
        lhs.cmp(rhs)
    }
}

impl PartialOrd for PersonId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_owned();
        f.write_str(&value)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self::new(&id)
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.to_string()
    }
}

impl PartialEq<str> for PersonId {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|value| value == other)
    }
}

impl PartialEq<&str> for PersonId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
