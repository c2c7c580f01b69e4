//! Set card content: four features, three values each.
//!
//! The deck is the full combinatorial product: 3 colors x 3 shapes x
//! 3 shadings x counts {1, 2, 3} = 81 unique cards. Three cards form a set
//! when, for every one of the four features, the three cards are either all
//! the same or all different.

use serde::{Deserialize, Serialize};

use crate::core::card::Card;

/// Card color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetColor {
    Red,
    Green,
    Purple,
}

impl SetColor {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Purple];
}

impl std::fmt::Display for SetColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
        };
        write!(f, "{name}")
    }
}

/// Shape drawn on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetShape {
    Diamond,
    Oval,
    Squiggle,
}

impl SetShape {
    pub const ALL: [Self; 3] = [Self::Diamond, Self::Oval, Self::Squiggle];
}

impl std::fmt::Display for SetShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Diamond => "diamond",
            Self::Oval => "oval",
            Self::Squiggle => "squiggle",
        };
        write!(f, "{name}")
    }
}

/// Fill style of the shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetShading {
    Solid,
    Striped,
    Open,
}

impl SetShading {
    pub const ALL: [Self; 3] = [Self::Solid, Self::Striped, Self::Open];
}

impl std::fmt::Display for SetShading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Solid => "solid",
            Self::Striped => "striped",
            Self::Open => "open",
        };
        write!(f, "{name}")
    }
}

/// The face of one Set card: four features, three possibilities each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetFace {
    pub color: SetColor,
    pub shape: SetShape,
    pub shading: SetShading,
    /// Number of shapes drawn: 1, 2, or 3.
    pub count: u8,
}

/// Three values are compatible when all equal or pairwise distinct.
fn feature_ok<T: Eq>(a: T, b: T, c: T) -> bool {
    (a == b && b == c) || (a != b && a != c && b != c)
}

/// The Set rule: every feature must be all-same or all-different across the
/// three cards.
///
/// Pure, total, and invariant under permutation of its arguments.
pub fn is_set(a: &SetFace, b: &SetFace, c: &SetFace) -> bool {
    feature_ok(a.color, b.color, c.color)
        && feature_ok(a.shape, b.shape, c.shape)
        && feature_ok(a.shading, b.shading, c.shading)
        && feature_ok(a.count, b.count, c.count)
}

/// Build the full 81-card deck, one card per feature combination.
///
/// Ids encode the face (`"2-oval-striped-green"`) and are therefore unique.
#[must_use]
pub fn full_deck() -> Vec<Card<SetFace>> {
    let mut cards = Vec::with_capacity(81);
    for count in 1..=3u8 {
        for shape in SetShape::ALL {
            for shading in SetShading::ALL {
                for color in SetColor::ALL {
                    let face = SetFace {
                        color,
                        shape,
                        shading,
                        count,
                    };
                    let id = format!("{count}-{shape}-{shading}-{color}");
                    cards.push(Card::new(id, face));
                }
            }
        }
    }
    cards
}
