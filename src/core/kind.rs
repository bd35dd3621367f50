//! Object kinds, properties and colors.
//!
//! The vocabulary is closed: concrete objects are `Noun`s, and rule tokens
//! are three further kinds that name a noun, the `is` operator, or a
//! property. Names parse from both the puzzle vocabulary (`you`, `win`,
//! `stop`) and the internal names (`is_agent`, `is_goal`, `is_block`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A concrete object type that rules can talk about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Noun {
    Ball,
    Wall,
    Door,
    Baba,
}

impl Noun {
    /// All nouns, in registry order.
    pub const ALL: [Noun; 4] = [Noun::Ball, Noun::Wall, Noun::Door, Noun::Baba];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Noun::Ball => "ball",
            Noun::Wall => "wall",
            Noun::Door => "door",
            Noun::Baba => "baba",
        }
    }

    /// Default display color.
    #[must_use]
    pub const fn default_color(self) -> Color {
        match self {
            Noun::Ball => Color::Green,
            Noun::Wall => Color::Grey,
            Noun::Door => Color::Red,
            Noun::Baba => Color::White,
        }
    }
}

impl FromStr for Noun {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ball" | "fball" => Ok(Noun::Ball),
            "wall" | "fwall" => Ok(Noun::Wall),
            "door" | "fdoor" => Ok(Noun::Door),
            "baba" => Ok(Noun::Baba),
            other => Err(Error::UnknownObject(other.to_string())),
        }
    }
}

impl std::fmt::Display for Noun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A behavioral property assigned by rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    /// Solid: can't be entered unless pushed away ("stop").
    Block,
    /// Displaced by movers entering its cell.
    Push,
    /// Agents standing on it win ("win").
    Goal,
    /// Agents standing on it lose ("lose").
    Defeat,
    /// Controlled by the step action ("you").
    Agent,
    /// Dragged behind entities moving away from it.
    Pull,
    /// Advances along its facing every step.
    Move,
}

impl Property {
    /// All properties, in registry order.
    pub const ALL: [Property; 7] = [
        Property::Block,
        Property::Push,
        Property::Goal,
        Property::Defeat,
        Property::Agent,
        Property::Pull,
        Property::Move,
    ];

    /// Puzzle-vocabulary name, as written on the rule token.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Property::Block => "stop",
            Property::Push => "push",
            Property::Goal => "win",
            Property::Defeat => "lose",
            Property::Agent => "you",
            Property::Pull => "pull",
            Property::Move => "move",
        }
    }

    /// Internal name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Property::Block => "is_block",
            Property::Push => "can_push",
            Property::Goal => "is_goal",
            Property::Defeat => "is_defeat",
            Property::Agent => "is_agent",
            Property::Pull => "is_pull",
            Property::Move => "is_move",
        }
    }
}

impl FromStr for Property {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|p| p.name() == s || p.key() == s)
            .or(match s {
                "block" => Some(Property::Block),
                "goal" => Some(Property::Goal),
                "defeat" => Some(Property::Defeat),
                "agent" => Some(Property::Agent),
                _ => None,
            })
            .ok_or_else(|| Error::UnknownProperty(s.to_string()))
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entity kind: a concrete object or one of the three rule-token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A concrete object.
    Object(Noun),
    /// Rule token naming a noun (first word of a rule).
    RuleObject(Noun),
    /// Rule token for the `is` operator.
    RuleIs,
    /// Rule token naming a property (last word of a rule).
    RuleProperty(Property),
}

impl ObjectKind {
    /// Check if this is one of the rule-token kinds.
    #[must_use]
    pub const fn is_rule_token(self) -> bool {
        !matches!(self, ObjectKind::Object(_))
    }

    /// The concrete noun, if this is a concrete object.
    #[must_use]
    pub const fn noun(self) -> Option<Noun> {
        match self {
            ObjectKind::Object(noun) => Some(noun),
            _ => None,
        }
    }

    /// Default display color. Rule tokens are purple.
    #[must_use]
    pub const fn default_color(self) -> Color {
        match self {
            ObjectKind::Object(noun) => noun.default_color(),
            _ => Color::Purple,
        }
    }
}

impl From<Noun> for ObjectKind {
    fn from(noun: Noun) -> Self {
        ObjectKind::Object(noun)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Object(noun) => write!(f, "{}", noun),
            ObjectKind::RuleObject(noun) => write!(f, "[{}]", noun),
            ObjectKind::RuleIs => f.write_str("[is]"),
            ObjectKind::RuleProperty(property) => write!(f, "[{}]", property),
        }
    }
}

/// Display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Purple,
    Yellow,
    Grey,
    White,
}

impl Color {
    /// All colors, in registry order.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Yellow,
        Color::Grey,
        Color::White,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Yellow => "yellow",
            Color::Grey => "grey",
            Color::White => "white",
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_parse() {
        assert_eq!("ball".parse::<Noun>(), Ok(Noun::Ball));
        assert_eq!("fball".parse::<Noun>(), Ok(Noun::Ball));
        assert_eq!("fwall".parse::<Noun>(), Ok(Noun::Wall));
        assert_eq!("baba".parse::<Noun>(), Ok(Noun::Baba));
        assert_eq!(
            "keke".parse::<Noun>(),
            Err(Error::UnknownObject("keke".to_string()))
        );
    }

    #[test]
    fn test_property_parse_both_vocabularies() {
        assert_eq!("you".parse::<Property>(), Ok(Property::Agent));
        assert_eq!("is_agent".parse::<Property>(), Ok(Property::Agent));
        assert_eq!("stop".parse::<Property>(), Ok(Property::Block));
        assert_eq!("is_block".parse::<Property>(), Ok(Property::Block));
        assert_eq!("can_push".parse::<Property>(), Ok(Property::Push));
        assert_eq!("win".parse::<Property>(), Ok(Property::Goal));
        assert_eq!("lose".parse::<Property>(), Ok(Property::Defeat));
        assert_eq!("defeat".parse::<Property>(), Ok(Property::Defeat));
        assert!(matches!("sink".parse::<Property>(), Err(Error::UnknownProperty(_))));
    }

    #[test]
    fn test_property_names_round_trip() {
        for property in Property::ALL {
            assert_eq!(property.name().parse::<Property>(), Ok(property));
            assert_eq!(property.key().parse::<Property>(), Ok(property));
        }
    }

    #[test]
    fn test_object_kind() {
        let ball = ObjectKind::Object(Noun::Ball);
        assert!(!ball.is_rule_token());
        assert_eq!(ball.noun(), Some(Noun::Ball));
        assert_eq!(ball.default_color(), Color::Green);

        let token = ObjectKind::RuleObject(Noun::Ball);
        assert!(token.is_rule_token());
        assert_eq!(token.noun(), None);
        assert_eq!(token.default_color(), Color::Purple);

        assert_eq!(ObjectKind::from(Noun::Wall), ObjectKind::Object(Noun::Wall));
    }

    #[test]
    fn test_object_kind_display() {
        assert_eq!(ObjectKind::Object(Noun::Baba).to_string(), "baba");
        assert_eq!(ObjectKind::RuleObject(Noun::Baba).to_string(), "[baba]");
        assert_eq!(ObjectKind::RuleIs.to_string(), "[is]");
        assert_eq!(ObjectKind::RuleProperty(Property::Agent).to_string(), "[you]");
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("grey".parse::<Color>(), Ok(Color::Grey));
        assert!(matches!("gray".parse::<Color>(), Err(Error::UnknownColor(_))));
    }

    #[test]
    fn test_kind_serde() {
        let kind = ObjectKind::RuleProperty(Property::Push);
        let json = serde_json::to_string(&kind).unwrap();
        let back: ObjectKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
