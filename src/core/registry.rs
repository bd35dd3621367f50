//! Immutable type registry.
//!
//! The registry assigns stable integer indices to object kinds, colors and
//! properties, for hosts that encode the grid or the ruleset numerically.
//! It is built once and passed by reference; nothing mutates it afterwards.
//!
//! ## Index Layout
//!
//! Object indices start at 1 (0 is reserved for "empty cell"):
//! - concrete nouns, in `Noun::ALL` order
//! - `RuleObject`, `RuleIs`, `RuleProperty` (one index each; the token's
//!   word is encoded separately through `word_index`)

use rustc_hash::FxHashMap;

use super::entity::Entity;
use super::kind::{Color, Noun, ObjectKind, Property};
use crate::error::Result;

/// Index reserved for an empty cell.
pub const EMPTY_INDEX: u8 = 0;

/// Immutable name/index tables.
///
/// ## Example
///
/// ```
/// use rust_ruleblocks::core::{Noun, ObjectKind, Property, Registry};
///
/// let registry = Registry::standard();
/// assert_eq!(registry.object_index(ObjectKind::Object(Noun::Ball)), 1);
/// assert_eq!(registry.noun("fwall").unwrap(), Noun::Wall);
/// assert_eq!(registry.property("you").unwrap(), Property::Agent);
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    objects: FxHashMap<ObjectKind, u8>,
    colors: FxHashMap<Color, u8>,
    words: FxHashMap<ObjectKind, u8>,
}

impl Registry {
    /// Build the standard registry.
    #[must_use]
    pub fn standard() -> Self {
        let mut objects = FxHashMap::default();
        let mut next = EMPTY_INDEX + 1;
        for noun in Noun::ALL {
            objects.insert(ObjectKind::Object(noun), next);
            next += 1;
        }
        let rule_object = next;
        let rule_is = next + 1;
        let rule_property = next + 2;
        for noun in Noun::ALL {
            objects.insert(ObjectKind::RuleObject(noun), rule_object);
        }
        objects.insert(ObjectKind::RuleIs, rule_is);
        for property in Property::ALL {
            objects.insert(ObjectKind::RuleProperty(property), rule_property);
        }

        let colors = Color::ALL
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u8))
            .collect();

        // Token words share one index space: nouns, then "is", then properties.
        let mut words = FxHashMap::default();
        let mut word = 0u8;
        for noun in Noun::ALL {
            words.insert(ObjectKind::RuleObject(noun), word);
            word += 1;
        }
        words.insert(ObjectKind::RuleIs, word);
        word += 1;
        for property in Property::ALL {
            words.insert(ObjectKind::RuleProperty(property), word);
            word += 1;
        }

        Self { objects, colors, words }
    }

    /// Index of an object kind. Never `EMPTY_INDEX`.
    #[must_use]
    pub fn object_index(&self, kind: ObjectKind) -> u8 {
        self.objects[&kind]
    }

    /// Index of a color.
    #[must_use]
    pub fn color_index(&self, color: Color) -> u8 {
        self.colors[&color]
    }

    /// Index of a property, in `Property::ALL` order.
    #[must_use]
    pub fn property_index(&self, property: Property) -> usize {
        property as usize
    }

    /// Index of the word written on a rule token, `None` for concrete objects.
    #[must_use]
    pub fn word_index(&self, kind: ObjectKind) -> Option<u8> {
        self.words.get(&kind).copied()
    }

    /// Number of distinct object indices, including the empty index.
    #[must_use]
    pub fn object_count(&self) -> usize {
        let mut distinct: Vec<u8> = self.objects.values().copied().collect();
        distinct.sort_unstable();
        distinct.dedup();
        distinct.len() + 1
    }

    /// Encode an entity as `(kind, color-or-word, facing)`.
    ///
    /// Rule tokens are characterized by their word instead of their color.
    #[must_use]
    pub fn encode(&self, entity: &Entity) -> [u8; 3] {
        let second = self
            .word_index(entity.kind)
            .unwrap_or_else(|| self.color_index(entity.color));
        [self.object_index(entity.kind), second, entity.facing.index() as u8]
    }

    /// Parse a noun name, failing fast on unknown names.
    pub fn noun(&self, name: &str) -> Result<Noun> {
        name.parse()
    }

    /// Parse a property name, failing fast on unknown names.
    pub fn property(&self, name: &str) -> Result<Property> {
        name.parse()
    }

    /// Parse a color name, failing fast on unknown names.
    pub fn color(&self, name: &str) -> Result<Color> {
        name.parse()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::{Direction, Pos};
    use crate::error::Error;

    #[test]
    fn test_object_indices() {
        let registry = Registry::standard();

        assert_eq!(registry.object_index(ObjectKind::Object(Noun::Ball)), 1);
        assert_eq!(registry.object_index(ObjectKind::Object(Noun::Baba)), 4);

        // All rule-object tokens share one index
        assert_eq!(
            registry.object_index(ObjectKind::RuleObject(Noun::Ball)),
            registry.object_index(ObjectKind::RuleObject(Noun::Wall))
        );
        assert_ne!(
            registry.object_index(ObjectKind::RuleIs),
            registry.object_index(ObjectKind::RuleObject(Noun::Ball))
        );

        // 4 nouns + 3 token kinds + empty
        assert_eq!(registry.object_count(), 8);
    }

    #[test]
    fn test_word_indices_are_distinct() {
        let registry = Registry::standard();
        let mut words = Vec::new();
        for noun in Noun::ALL {
            words.push(registry.word_index(ObjectKind::RuleObject(noun)).unwrap());
        }
        words.push(registry.word_index(ObjectKind::RuleIs).unwrap());
        for property in Property::ALL {
            words.push(registry.word_index(ObjectKind::RuleProperty(property)).unwrap());
        }
        let count = words.len();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), count);

        assert_eq!(registry.word_index(ObjectKind::Object(Noun::Ball)), None);
    }

    #[test]
    fn test_encode() {
        let registry = Registry::standard();

        let baba = Entity::new(ObjectKind::Object(Noun::Baba), Pos::new(1, 1)).facing(Direction::Left);
        assert_eq!(
            registry.encode(&baba),
            [4, registry.color_index(Color::White), 2]
        );

        let is = Entity::new(ObjectKind::RuleIs, Pos::new(2, 1));
        assert_eq!(registry.encode(&is)[1], registry.word_index(ObjectKind::RuleIs).unwrap());
    }

    #[test]
    fn test_name_lookup_fails_fast() {
        let registry = Registry::standard();
        assert_eq!(registry.noun("fball"), Ok(Noun::Ball));
        assert_eq!(registry.property("is_goal"), Ok(Property::Goal));
        assert_eq!(registry.color("white"), Ok(Color::White));
        assert_eq!(registry.noun("rock"), Err(Error::UnknownObject("rock".into())));
        assert_eq!(registry.property("hot"), Err(Error::UnknownProperty("hot".into())));
    }
}
