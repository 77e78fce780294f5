//! Core type definitions for diagram translation
//!
//! This module contains the closed vocabularies shared by the parsers and
//! generators: node shapes, arrow styles, ER cardinalities and flow direction.
//!
//! Every enum has a textual name used by `Display`, `FromStr` and serde.
//! Deserializing an unknown name yields the enum's default instead of failing,
//! so a partially invalid graph coming from the editor can always be generated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DiagramError;

/// Node shapes supported by the flowchart editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rectangle,
    /// Diamond (decision): `A{label}`
    Diamond,
    /// Rounded rectangle: `A(label)`
    Rounded,
    /// Circle: `A((label))`
    Circle,
    /// Hexagon: `A{{label}}`
    Hexagon,
    /// Stadium: `A([label])`
    Stadium,
}

impl NodeShape {
    /// All shapes, in declaration order
    pub const ALL: [NodeShape; 6] = [
        NodeShape::Rectangle,
        NodeShape::Diamond,
        NodeShape::Rounded,
        NodeShape::Circle,
        NodeShape::Hexagon,
        NodeShape::Stadium,
    ];

    /// Opening and closing delimiters Mermaid uses for this shape
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rectangle => ("[", "]"),
            NodeShape::Diamond => ("{", "}"),
            NodeShape::Rounded => ("(", ")"),
            NodeShape::Circle => ("((", "))"),
            NodeShape::Hexagon => ("{{", "}}"),
            NodeShape::Stadium => ("([", "])"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeShape::Rectangle => "rectangle",
            NodeShape::Diamond => "diamond",
            NodeShape::Rounded => "rounded",
            NodeShape::Circle => "circle",
            NodeShape::Hexagon => "hexagon",
            NodeShape::Stadium => "stadium",
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeShape {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeShape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| DiagramError::unknown_variant("node shape", s))
    }
}

impl From<String> for NodeShape {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

/// Edge arrow styles supported by the flowchart editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ArrowType {
    /// Solid arrow: `-->`
    #[default]
    Arrow,
    /// Thick arrow: `==>`
    Thick,
    /// Dotted arrow: `-.->`
    Dotted,
    /// Invisible link: `~~~`
    Invisible,
    /// Arrow heads on both ends: `<-->`
    Bidirectional,
    /// Thick with arrow heads on both ends: `<==>`
    BidirectionalThick,
}

impl ArrowType {
    pub const ALL: [ArrowType; 6] = [
        ArrowType::Arrow,
        ArrowType::Thick,
        ArrowType::Dotted,
        ArrowType::Invisible,
        ArrowType::Bidirectional,
        ArrowType::BidirectionalThick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ArrowType::Arrow => "arrow",
            ArrowType::Thick => "thick",
            ArrowType::Dotted => "dotted",
            ArrowType::Invisible => "invisible",
            ArrowType::Bidirectional => "bidirectional",
            ArrowType::BidirectionalThick => "bidirectional-thick",
        }
    }

    /// The bare connector token, without spacing or label
    pub fn token(&self) -> &'static str {
        match self {
            ArrowType::Arrow => "-->",
            ArrowType::Thick => "==>",
            ArrowType::Dotted => "-.->",
            ArrowType::Invisible => "~~~",
            ArrowType::Bidirectional => "<-->",
            ArrowType::BidirectionalThick => "<==>",
        }
    }
}

impl fmt::Display for ArrowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArrowType {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArrowType::ALL
            .into_iter()
            .find(|arrow| arrow.name() == s)
            .ok_or_else(|| DiagramError::unknown_variant("arrow type", s))
    }
}

impl From<String> for ArrowType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

/// Crow's-foot relationship cardinality for ER diagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Cardinality {
    /// `||--||`
    OneToOne,
    /// `||--o{`
    #[default]
    OneToMany,
    /// `}o--||`
    ManyToOne,
    /// `}o--o{`
    ManyToMany,
    /// `o|--||`
    ZeroToOne,
    /// `||--o|`
    OneToZero,
}

impl Cardinality {
    pub const ALL: [Cardinality; 6] = [
        Cardinality::OneToOne,
        Cardinality::OneToMany,
        Cardinality::ManyToOne,
        Cardinality::ManyToMany,
        Cardinality::ZeroToOne,
        Cardinality::OneToZero,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "one-to-one",
            Cardinality::OneToMany => "one-to-many",
            Cardinality::ManyToOne => "many-to-one",
            Cardinality::ManyToMany => "many-to-many",
            Cardinality::ZeroToOne => "zero-to-one",
            Cardinality::OneToZero => "one-to-zero",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cardinality {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cardinality::ALL
            .into_iter()
            .find(|cardinality| cardinality.name() == s)
            .ok_or_else(|| DiagramError::unknown_variant("cardinality", s))
    }
}

impl From<String> for Cardinality {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

/// Flow direction written in the flowchart header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Direction {
    /// Top to bottom (TD or TB)
    #[default]
    #[serde(rename = "TD")]
    TopDown,
    /// Left to right (LR)
    #[serde(rename = "LR")]
    LeftRight,
    /// Right to left (RL)
    #[serde(rename = "RL")]
    RightLeft,
    /// Bottom to top (BT)
    #[serde(rename = "BT")]
    BottomUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopDown,
        Direction::LeftRight,
        Direction::RightLeft,
        Direction::BottomUp,
    ];

    /// Returns true if this is a vertical layout (TD or BT)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::TopDown | Direction::BottomUp)
    }

    /// Returns true if this is a horizontal layout (LR or RL)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TD"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
            Direction::BottomUp => write!(f, "BT"),
        }
    }
}

impl FromStr for Direction {
    type Err = DiagramError;

    /// Parse direction from mermaid syntax (TD, TB, LR, RL, BT), case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TD" | "TB" => Ok(Direction::TopDown),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "BT" => Ok(Direction::BottomUp),
            _ => Err(DiagramError::unknown_variant("direction", s)),
        }
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}
