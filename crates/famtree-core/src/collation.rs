//! Display-name ordering.
//!
//! Names are sorted the way a French-locale, case-insensitive collator sorts
//! them: accents and case are ignored at the primary level (`"Élodie"` sorts
//! next to `"elodie"`), then accents break ties, then case, then the raw
//! string. Ligatures such as `œ` and `æ` expand to their two-letter form.
//!
//! Names are decomposed (NFD) before comparison, so `"É"` and `"E\u{301}"`
//! weigh the same and any letter carrying combining marks sorts with its base
//! letter.
//!
//! Every deterministic tie-break in the engine (spouse choice, root order,
//! sibling order) goes through [`compare_names`].

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Secondary weight of letters that fold without a combining mark (`ø`, `œ`).
const FOLDED_LETTER_WEIGHT: u32 = 32;

/// Compares two display names.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use famtree_core::collation::compare_names;
///
/// assert_eq!(compare_names("alice", "Bob"), Ordering::Less);
/// assert_eq!(compare_names("Émile", "Eve"), Ordering::Less);
/// assert_eq!(compare_names("zoé", "Zoe"), Ordering::Greater);
/// assert_eq!(compare_names("Řehoř", "Zoé"), Ordering::Less);
/// ```
pub fn compare_names(lhs: &str, rhs: &str) -> Ordering {
    let (left, right) = (SortKey::new(lhs), SortKey::new(rhs));
    left.primary
        .cmp(&right.primary)
        .then_with(|| left.secondary.cmp(&right.secondary))
        .then_with(|| left.tertiary.cmp(&right.tertiary))
        .then_with(|| lhs.cmp(rhs))
}

/// Collation key of one name, one level per field.
#[derive(Debug, PartialEq, Eq)]
struct SortKey {
    /// Base letters only: lowercase, marks stripped, ligatures expanded.
    primary: String,
    /// Accent weights of each base letter.
    secondary: Vec<Vec<u32>>,
    /// Whether each base letter was uppercase.
    tertiary: Vec<bool>,
}

impl SortKey {
    fn new(name: &str) -> Self {
        let mut key = Self {
            primary: String::with_capacity(name.len()),
            secondary: Vec::new(),
            tertiary: Vec::new(),
        };

        for c in name.trim().nfd() {
            if is_combining_mark(c) {
                key.push_weight(mark_weight(c));
                continue;
            }

            key.secondary.push(Vec::new());
            key.tertiary.push(c.is_uppercase());
            for lower in c.to_lowercase() {
                if is_combining_mark(lower) {
                    key.push_weight(mark_weight(lower));
                } else if let Some(base) = fold_letter(lower) {
                    key.primary.push_str(base);
                    key.push_weight(FOLDED_LETTER_WEIGHT);
                } else {
                    key.primary.push(lower);
                }
            }
        }
        key
    }

    /// Attaches a weight to the current letter. A leading mark opens a slot.
    fn push_weight(&mut self, weight: u32) {
        match self.secondary.last_mut() {
            Some(weights) => weights.push(weight),
            None => {
                self.secondary.push(vec![weight]);
                self.tertiary.push(false);
            }
        }
    }
}

/// Letters with no canonical decomposition.
fn fold_letter(c: char) -> Option<&'static str> {
    let base = match c {
        'œ' => "oe",
        'æ' => "ae",
        'ß' => "ss",
        'þ' => "th",
        'đ' | 'ð' => "d",
        'ħ' => "h",
        'ı' => "i",
        'ł' => "l",
        'ø' => "o",
        'ŧ' => "t",
        _ => return None,
    };
    Some(base)
}

/// Orders the common accents acute, grave, circumflex, diaeresis, cedilla.
/// Marks outside that list sort after them by code point.
fn mark_weight(mark: char) -> u32 {
    match mark {
        '\u{301}' => 1,
        '\u{300}' => 2,
        '\u{302}' => 3,
        '\u{308}' => 4,
        '\u{327}' => 5,
        '\u{303}' => 6,
        '\u{30A}' => 7,
        '\u{304}' => 8,
        '\u{30C}' => 9,
        '\u{306}' => 10,
        '\u{30B}' => 11,
        '\u{328}' => 12,
        '\u{307}' => 13,
        other => FOLDED_LETTER_WEIGHT + u32::from(other),
    }
}
