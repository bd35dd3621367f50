//! The per-step property table.
//!
//! A `Ruleset` maps each property to the object kinds that currently hold
//! it. It is rebuilt from scratch every step by the compiler and is never
//! updated incrementally.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Noun, ObjectKind, Property};

/// Property table: `Property -> (ObjectKind -> bool)`.
///
/// Missing entries read as `false`. Serializes as a flat list of
/// `(kind, property, value)` entries so that it round-trips through JSON.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Noun, ObjectKind, Property};
/// use rust_ruleblocks::rules::Ruleset;
///
/// let mut ruleset = Ruleset::new();
/// ruleset.insert(Noun::Baba, Property::Agent);
///
/// assert!(ruleset.get(Property::Agent, ObjectKind::Object(Noun::Baba)));
/// assert!(!ruleset.get(Property::Goal, ObjectKind::Object(Noun::Baba)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<RuleEntry>", from = "Vec<RuleEntry>")]
pub struct Ruleset {
    table: FxHashMap<Property, FxHashMap<ObjectKind, bool>>,
}

/// One serialized ruleset entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub kind: ObjectKind,
    pub property: Property,
    pub value: bool,
}

impl Ruleset {
    /// Create an empty ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct lookup, `false` when absent.
    ///
    /// This doesn't apply derived implications; use
    /// [`has_property`](super::has_property) for behavior queries.
    #[must_use]
    pub fn get(&self, property: Property, kind: ObjectKind) -> bool {
        self.table
            .get(&property)
            .and_then(|kinds| kinds.get(&kind))
            .copied()
            .unwrap_or(false)
    }

    /// Set an entry.
    pub fn set(&mut self, property: Property, kind: ObjectKind, value: bool) {
        self.table.entry(property).or_default().insert(kind, value);
    }

    /// Assert `property` for a concrete noun (what a rule triple does).
    pub fn insert(&mut self, noun: Noun, property: Property) {
        self.set(property, ObjectKind::Object(noun), true);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, noun: Noun, property: Property) -> Self {
        self.insert(noun, property);
        self
    }

    /// Copy every entry of `other` into this ruleset.
    ///
    /// `true` always wins: an entry already `true` here stays `true`.
    pub fn merge(&mut self, other: &Ruleset) {
        for (&property, kinds) in &other.table {
            let target = self.table.entry(property).or_default();
            for (&kind, &value) in kinds {
                let slot = target.entry(kind).or_insert(false);
                *slot |= value;
            }
        }
    }

    /// Kinds that hold `property`, in sorted order.
    #[must_use]
    pub fn kinds_with(&self, property: Property) -> Vec<ObjectKind> {
        let mut kinds: Vec<ObjectKind> = self
            .table
            .get(&property)
            .into_iter()
            .flat_map(|kinds| kinds.iter())
            .filter(|(_, &v)| v)
            .map(|(&k, _)| k)
            .collect();
        kinds.sort_unstable();
        kinds
    }

    /// Every `true` entry as `(kind, property)`, sorted.
    #[must_use]
    pub fn active_rules(&self) -> Vec<(ObjectKind, Property)> {
        let mut rules: Vec<_> = self
            .table
            .iter()
            .flat_map(|(&p, kinds)| {
                kinds
                    .iter()
                    .filter(|(_, &v)| v)
                    .map(move |(&k, _)| (k, p))
            })
            .collect();
        rules.sort_unstable();
        rules
    }

    /// Number of `true` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table
            .values()
            .map(|kinds| kinds.values().filter(|&&v| v).count())
            .sum()
    }

    /// Check if no entry is `true`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode as a 0/1 matrix with one row per kind and one column per
    /// property, in the order given.
    #[must_use]
    pub fn encode_matrix(&self, kinds: &[ObjectKind], properties: &[Property]) -> Vec<Vec<u8>> {
        kinds
            .iter()
            .map(|&kind| {
                properties
                    .iter()
                    .map(|&property| u8::from(self.get(property, kind)))
                    .collect()
            })
            .collect()
    }

    /// Encode over every concrete noun and every property.
    #[must_use]
    pub fn encode_standard(&self) -> Vec<Vec<u8>> {
        let kinds: Vec<ObjectKind> = Noun::ALL.iter().map(|&n| ObjectKind::Object(n)).collect();
        self.encode_matrix(&kinds, &Property::ALL)
    }
}

impl From<Ruleset> for Vec<RuleEntry> {
    fn from(ruleset: Ruleset) -> Self {
        let mut entries: Vec<RuleEntry> = ruleset
            .table
            .iter()
            .flat_map(|(&property, kinds)| {
                kinds.iter().map(move |(&kind, &value)| RuleEntry { kind, property, value })
            })
            .collect();
        entries.sort_unstable_by_key(|e| (e.property, e.kind));
        entries
    }
}

impl From<Vec<RuleEntry>> for Ruleset {
    fn from(entries: Vec<RuleEntry>) -> Self {
        let mut ruleset = Ruleset::new();
        for entry in entries {
            ruleset.set(entry.property, entry.kind, entry.value);
        }
        ruleset
    }
}

impl std::fmt::Display for Ruleset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules = self.active_rules();
        if rules.is_empty() {
            return f.write_str("{}");
        }
        let parts: Vec<String> = rules.iter().map(|(k, p)| format!("{} is {}", k, p)).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
