//! Property queries against a compiled ruleset.
//!
//! Properties are pure data lookups. On top of the direct ruleset entry,
//! two things are resolved at query time and never written back into the
//! ruleset:
//!
//! - **Implied block**: a kind holding `pull` or `agent` is also `block`.
//! - **Token solidity**: rule tokens are always `block` and `push`, except
//!   that an anchored entity is never `push`.

use crate::core::{Entity, ObjectKind, Property};

use super::ruleset::Ruleset;

/// Check whether a kind holds `property` under `ruleset`.
///
/// Doesn't know about per-entity state (anchoring); prefer
/// [`has_property`] when an entity is at hand.
#[must_use]
pub fn kind_has_property(kind: ObjectKind, property: Property, ruleset: &Ruleset) -> bool {
    if ruleset.get(property, kind) {
        return true;
    }
    match property {
        Property::Block => {
            kind.is_rule_token()
                || ruleset.get(Property::Pull, kind)
                || ruleset.get(Property::Agent, kind)
        }
        Property::Push => kind.is_rule_token(),
        _ => false,
    }
}

/// Check whether an entity currently holds `property`.
#[must_use]
pub fn has_property(entity: &Entity, property: Property, ruleset: &Ruleset) -> bool {
    if property == Property::Push && entity.anchored {
        return false;
    }
    kind_has_property(entity.kind, property, ruleset)
}

/// Borrowed view for repeated queries against one ruleset.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    ruleset: &'a Ruleset,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `ruleset`.
    #[must_use]
    pub fn new(ruleset: &'a Ruleset) -> Self {
        Self { ruleset }
    }

    /// The underlying ruleset.
    #[must_use]
    pub fn ruleset(&self) -> &'a Ruleset {
        self.ruleset
    }

    /// Check whether an entity currently holds `property`.
    #[must_use]
    pub fn has(&self, entity: &Entity, property: Property) -> bool {
        has_property(entity, property, self.ruleset)
    }

    /// Entity stands in the way of movement (`block` or `push`).
    #[must_use]
    pub fn is_obstacle(&self, entity: &Entity) -> bool {
        self.has(entity, Property::Block) || self.has(entity, Property::Push)
    }

    /// Entity is displaced by movers entering its cell.
    #[must_use]
    pub fn is_pushable(&self, entity: &Entity) -> bool {
        self.has(entity, Property::Push)
    }

    /// Entity is dragged behind movers.
    #[must_use]
    pub fn is_pullable(&self, entity: &Entity) -> bool {
        !entity.anchored && self.has(entity, Property::Pull)
    }
}
