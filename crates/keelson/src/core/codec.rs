//! Shape, arrow and cardinality codecs
//!
//! Pure mappings between the closed enums in [`super::types`] and the literal
//! Mermaid syntax for each of them.

use super::sanitize::is_cjk;
use super::{ArrowType, Cardinality, NodeShape};

/// Crow's-foot digraph for every cardinality, in [`Cardinality::ALL`] order
pub const ER_CARDINALITY_SYMBOLS: [(Cardinality, &str); 6] = [
    (Cardinality::OneToOne, "||--||"),
    (Cardinality::OneToMany, "||--o{"),
    (Cardinality::ManyToOne, "}o--||"),
    (Cardinality::ManyToMany, "}o--o{"),
    (Cardinality::ZeroToOne, "o|--||"),
    (Cardinality::OneToZero, "||--o|"),
];

/// Wrap a label in the delimiters of `shape`: `[label]`, `((label))`, ...
pub fn encode_shape(shape: NodeShape, label: &str) -> String {
    let (open, close) = shape.delimiters();
    format!("{open}{label}{close}")
}

/// Prepare an edge label for embedding in an arrow.
///
/// Blank labels yield `None`. Labels made of ASCII letters, digits, `-`, `_`,
/// spaces and CJK characters pass through; anything else is double-quoted with
/// inner quotes escaped.
pub fn format_edge_label(label: Option<&str>) -> Option<String> {
    let label = label.filter(|l| !l.trim().is_empty())?;

    if label.chars().all(is_plain_label_char) {
        return Some(label.to_string());
    }

    Some(format!("\"{}\"", label.replace('"', "\\\"")))
}

fn is_plain_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ') || is_cjk(c)
}

/// Encode an arrow, including the spaces around it.
///
/// Dotted and bidirectional-thick arrows embed the label between their
/// strokes (`-. L .->`, `<==L==>`); the others use pipes (`-->|L|`).
pub fn encode_arrow(arrow: ArrowType, label: Option<&str>) -> String {
    let Some(label) = format_edge_label(label) else {
        return format!(" {} ", arrow.token());
    };

    match arrow {
        ArrowType::Arrow => format!(" -->|{label}| "),
        ArrowType::Thick => format!(" ==>|{label}| "),
        ArrowType::Dotted => format!(" -. {label} .-> "),
        ArrowType::Invisible => format!(" ~~~|{label}| "),
        ArrowType::Bidirectional => format!(" <-->|{label}| "),
        ArrowType::BidirectionalThick => format!(" <=={label}==> "),
    }
}

/// One-glyph symbol for compact display of an arrow type
pub fn arrow_type_symbol(arrow: ArrowType) -> &'static str {
    match arrow {
        ArrowType::Arrow => "→",
        ArrowType::Thick => "⇒",
        ArrowType::Dotted => "⇢",
        ArrowType::Invisible => "～",
        ArrowType::Bidirectional => "↔",
        ArrowType::BidirectionalThick => "⇔",
    }
}

/// Human-readable (Japanese) name of an arrow type with its syntax
pub fn arrow_type_display_name(arrow: ArrowType) -> &'static str {
    match arrow {
        ArrowType::Arrow => "通常の矢印 (->)",
        ArrowType::Thick => "太い矢印 (==>)",
        ArrowType::Dotted => "点線の矢印 (-.->)",
        ArrowType::Invisible => "非表示のリンク (~~~)",
        ArrowType::Bidirectional => "双方向の矢印 (<-->)",
        ArrowType::BidirectionalThick => "太い双方向の矢印 (<==>)",
    }
}

/// Crow's-foot symbol for a cardinality
pub fn cardinality_symbol(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::OneToOne => "||--||",
        Cardinality::OneToMany => "||--o{",
        Cardinality::ManyToOne => "}o--||",
        Cardinality::ManyToMany => "}o--o{",
        Cardinality::ZeroToOne => "o|--||",
        Cardinality::OneToZero => "||--o|",
    }
}

/// Inverse of [`cardinality_symbol`]; unknown symbols decode as one-to-many
pub fn cardinality_from_symbol(symbol: &str) -> Cardinality {
    ER_CARDINALITY_SYMBOLS
        .iter()
        .find(|(_, s)| *s == symbol)
        .map(|(cardinality, _)| *cardinality)
        .unwrap_or_default()
}
