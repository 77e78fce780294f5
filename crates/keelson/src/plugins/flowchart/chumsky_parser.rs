//! Flowchart line grammar using chumsky
//!
//! Each trimmed line of a flowchart is either a node definition or an edge
//! definition. Several Mermaid forms are prefixes or substrings of others
//! (`-->` inside `<-->`, `(` before `((`), so both kinds of statement are
//! matched against an explicit ordered table, most specific form first, and
//! the first form that matches the whole line wins.

use chumsky::prelude::*;

use crate::core::chumsky_utils::{
    identifier, inline_whitespace, quoted_string, text_until, text_until_final, unquote,
};
use crate::core::{ArrowType, Direction, NodeShape};

/// Order in which node shapes are tried, for whole-line definitions and for
/// shape decorations on edge endpoints alike
pub const NODE_SHAPE_ORDER: [NodeShape; 6] = [
    NodeShape::Rectangle,
    NodeShape::Circle,
    NodeShape::Hexagon,
    NodeShape::Stadium,
    NodeShape::Rounded,
    NodeShape::Diamond,
];

/// A line containing any of these is never read as a node definition
pub const ARROW_TOKENS: [&str; 6] = ["-->", "==>", "-.->", "~~~", "<-->", "<==>"];

/// How an edge pattern carries its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSyntax {
    /// No label: `A --> B`
    None,
    /// Pipe-delimited after the connector: `A -->|label| B`
    Pipe,
    /// Between an opening stroke and the connector: `A -- label --> B`
    Side { opener: &'static str },
}

/// One row of the ordered edge grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePattern {
    pub name: &'static str,
    pub arrow: ArrowType,
    /// Connector token that ends the arrow
    pub connector: &'static str,
    pub label: LabelSyntax,
}

const fn pattern(
    name: &'static str,
    arrow: ArrowType,
    connector: &'static str,
    label: LabelSyntax,
) -> EdgePattern {
    EdgePattern {
        name,
        arrow,
        connector,
        label,
    }
}

/// Edge grammar, most specific first
pub const EDGE_PATTERNS: [EdgePattern; 16] = [
    pattern(
        "bidirectional-thick-side-label",
        ArrowType::BidirectionalThick,
        "==>",
        LabelSyntax::Side { opener: "<==" },
    ),
    pattern(
        "bidirectional-thick",
        ArrowType::BidirectionalThick,
        "<==>",
        LabelSyntax::None,
    ),
    pattern(
        "bidirectional-pipe-label",
        ArrowType::Bidirectional,
        "<-->",
        LabelSyntax::Pipe,
    ),
    pattern(
        "bidirectional-side-label",
        ArrowType::Bidirectional,
        "-->",
        LabelSyntax::Side { opener: "<--" },
    ),
    pattern(
        "bidirectional",
        ArrowType::Bidirectional,
        "<-->",
        LabelSyntax::None,
    ),
    pattern(
        "dotted-pipe-label",
        ArrowType::Dotted,
        "-.->",
        LabelSyntax::Pipe,
    ),
    pattern(
        "dotted-side-label",
        ArrowType::Dotted,
        ".->",
        LabelSyntax::Side { opener: "-." },
    ),
    pattern("dotted", ArrowType::Dotted, "-.->", LabelSyntax::None),
    pattern("thick-pipe-label", ArrowType::Thick, "==>", LabelSyntax::Pipe),
    pattern(
        "thick-side-label",
        ArrowType::Thick,
        "==>",
        LabelSyntax::Side { opener: "==" },
    ),
    pattern("thick", ArrowType::Thick, "==>", LabelSyntax::None),
    pattern(
        "invisible-pipe-label",
        ArrowType::Invisible,
        "~~~",
        LabelSyntax::Pipe,
    ),
    pattern("invisible", ArrowType::Invisible, "~~~", LabelSyntax::None),
    pattern("arrow-pipe-label", ArrowType::Arrow, "-->", LabelSyntax::Pipe),
    pattern(
        "arrow-side-label",
        ArrowType::Arrow,
        "-->",
        LabelSyntax::Side { opener: "--" },
    ),
    pattern("arrow", ArrowType::Arrow, "-->", LabelSyntax::None),
];

/// A whole-line node definition: `A`, `A[label]`, `A((label))`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDefinition {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
}

/// An edge endpoint as written, with its optional shape decoration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: String,
    pub decoration: Option<(NodeShape, String)>,
}

/// A whole-line edge definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDefinition {
    pub from: NodeRef,
    pub to: NodeRef,
    pub arrow: ArrowType,
    pub label: String,
    /// Name of the [`EdgePattern`] that matched
    pub pattern: &'static str,
}

/// Chumsky-based flowchart line parser
pub struct ChumskyFlowchartParser;

impl ChumskyFlowchartParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a graph declaration header (e.g. `graph TD` or `flowchart LR`).
    ///
    /// A bare `graph`/`flowchart` means top-down; an unknown direction token
    /// yields `None`.
    pub fn parse_header(&self, line: &str) -> Option<Direction> {
        let mut parts = line.split_whitespace();
        let keyword = parts.next()?;
        if !keyword.eq_ignore_ascii_case("graph") && !keyword.eq_ignore_ascii_case("flowchart") {
            return None;
        }

        match parts.next() {
            Some(direction) => direction.trim_end_matches(';').parse().ok(),
            None => Some(Direction::TopDown),
        }
    }

    /// Parse a node definition line, trying [`NODE_SHAPE_ORDER`] and then a
    /// bare identifier
    pub fn parse_node_definition(&self, line: &str) -> Option<NodeDefinition> {
        if ARROW_TOKENS.iter().any(|token| line.contains(token)) {
            return None;
        }

        NODE_SHAPE_ORDER
            .iter()
            .find_map(|&shape| {
                Self::shaped_node(shape)
                    .parse(line)
                    .into_result()
                    .ok()
                    .map(|(id, label)| NodeDefinition {
                        id: id.to_string(),
                        label: label.to_string(),
                        shape,
                    })
            })
            .or_else(|| {
                identifier()
                    .then_ignore(end())
                    .parse(line)
                    .into_result()
                    .ok()
                    .map(|id| NodeDefinition {
                        id: id.to_string(),
                        label: id.to_string(),
                        shape: NodeShape::Rectangle,
                    })
            })
    }

    /// Parse an edge definition line against [`EDGE_PATTERNS`] in order
    pub fn parse_edge_definition(&self, line: &str) -> Option<EdgeDefinition> {
        EDGE_PATTERNS
            .iter()
            .find_map(|pattern| Self::match_edge(pattern, line))
    }

    /// Try a single edge pattern against a whole line
    pub fn match_edge(pattern: &EdgePattern, line: &str) -> Option<EdgeDefinition> {
        let source = Self::node_ref().then_ignore(inline_whitespace());
        let target = inline_whitespace()
            .ignore_then(Self::node_ref())
            .then_ignore(end());
        let connector = pattern.connector;

        let parsed = match pattern.label {
            LabelSyntax::None => source
                .then_ignore(just(connector))
                .then(target)
                .map(|(from, to)| (from, String::new(), to))
                .parse(line)
                .into_result()
                .ok(),
            LabelSyntax::Pipe => source
                .then_ignore(just(connector))
                .then_ignore(inline_whitespace())
                .then(Self::pipe_label())
                .then(target)
                .map(|((from, label), to)| (from, label, to))
                .parse(line)
                .into_result()
                .ok(),
            LabelSyntax::Side { opener } => source
                .then_ignore(just(opener))
                .then_ignore(inline_whitespace())
                .then(Self::side_label(opener, connector))
                .then_ignore(just(connector))
                .then(target)
                .map(|((from, label), to)| (from, label, to))
                .parse(line)
                .into_result()
                .ok(),
        };

        parsed.map(|(from, label, to)| EdgeDefinition {
            from,
            to,
            arrow: pattern.arrow,
            label,
            pattern: pattern.name,
        })
    }

    /// `ID` followed by `shape`'s delimiters closing at the end of the line
    fn shaped_node<'src>(
        shape: NodeShape,
    ) -> impl Parser<'src, &'src str, (&'src str, &'src str)> + Clone {
        let (open, close) = shape.delimiters();

        identifier()
            .then_ignore(just(open))
            .then(text_until_final(close))
            .then_ignore(just(close))
            .then_ignore(end())
    }

    /// Shape decoration on an edge endpoint; the label stops at the first
    /// closing delimiter
    fn decoration<'src>(
        shape: NodeShape,
    ) -> impl Parser<'src, &'src str, (NodeShape, String)> + Clone {
        let (open, close) = shape.delimiters();

        just(open)
            .ignore_then(text_until(close))
            .then_ignore(just(close))
            .map(move |label: &str| (shape, label.to_string()))
    }

    fn node_ref<'src>() -> impl Parser<'src, &'src str, NodeRef> + Clone {
        let [first, second, third, fourth, fifth, sixth] = NODE_SHAPE_ORDER;
        let decoration = Self::decoration(first)
            .or(Self::decoration(second))
            .or(Self::decoration(third))
            .or(Self::decoration(fourth))
            .or(Self::decoration(fifth))
            .or(Self::decoration(sixth));

        identifier()
            .then(decoration.or_not())
            .map(|(id, decoration)| NodeRef {
                id: id.to_string(),
                decoration,
            })
    }

    /// `|label|`, optionally quoted inside the pipes
    fn pipe_label<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        let quoted = inline_whitespace()
            .ignore_then(quoted_string())
            .then_ignore(inline_whitespace());
        let bare = none_of('|').repeated().to_slice().map(unquote);

        just('|')
            .ignore_then(quoted.or(bare))
            .then_ignore(just('|'))
    }

    /// Label between an opening stroke and `connector`.
    ///
    /// A bare label may not complete an arrow with `opener` or contain one,
    /// so a chained line such as `A --> B --> C` matches no side-label form.
    fn side_label<'src>(
        opener: &'static str,
        connector: &'static str,
    ) -> impl Parser<'src, &'src str, String> + Clone {
        let quoted = quoted_string().then_ignore(inline_whitespace());
        let bare = any()
            .and_is(just(connector).not())
            .repeated()
            .at_least(1)
            .to_slice()
            .filter(move |label: &&str| !is_arrow_fragment(opener, label))
            .map(unquote);

        quoted.or(bare)
    }
}

/// Text after `opener` that is part of an arrow rather than a label
fn is_arrow_fragment(opener: &str, label: &str) -> bool {
    let joined = format!("{opener}{label}");
    ARROW_TOKENS
        .iter()
        .any(|token| joined.starts_with(token) || label.contains(token))
}

impl Default for ChumskyFlowchartParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(line: &str) -> Option<NodeDefinition> {
        ChumskyFlowchartParser::new().parse_node_definition(line)
    }

    fn edge(line: &str) -> Option<EdgeDefinition> {
        ChumskyFlowchartParser::new().parse_edge_definition(line)
    }

    #[test]
    fn test_parse_header() {
        let parser = ChumskyFlowchartParser::new();
        assert_eq!(parser.parse_header("flowchart LR"), Some(Direction::LeftRight));
        assert_eq!(parser.parse_header("graph TB"), Some(Direction::TopDown));
        assert_eq!(parser.parse_header("graph BT;"), Some(Direction::BottomUp));
        assert_eq!(parser.parse_header("flowchart"), Some(Direction::TopDown));
        assert_eq!(parser.parse_header("flowchart XY"), None);
        assert_eq!(parser.parse_header("A --> B"), None);
    }

    #[test]
    fn test_node_shapes() {
        let cases = [
            ("A[Rect]", NodeShape::Rectangle, "Rect"),
            ("A{Decide}", NodeShape::Diamond, "Decide"),
            ("A(Round)", NodeShape::Rounded, "Round"),
            ("A((Circle))", NodeShape::Circle, "Circle"),
            ("A{{Hex}}", NodeShape::Hexagon, "Hex"),
            ("A([Stadium])", NodeShape::Stadium, "Stadium"),
        ];
        for (line, shape, label) in cases {
            let parsed = node(line).unwrap_or_else(|| panic!("no match for {line}"));
            assert_eq!(parsed.id, "A");
            assert_eq!(parsed.shape, shape, "{line}");
            assert_eq!(parsed.label, label, "{line}");
        }
    }

    #[test]
    fn test_bare_node_uses_id_as_label() {
        let parsed = node("開始").unwrap();
        assert_eq!(parsed.label, "開始");
        assert_eq!(parsed.shape, NodeShape::Rectangle);
    }

    #[test]
    fn test_node_label_keeps_inner_brackets() {
        let parsed = node("A[list[0]]").unwrap();
        assert_eq!(parsed.label, "list[0]");
        assert_eq!(parsed.shape, NodeShape::Rectangle);
    }

    #[test]
    fn test_node_rejects_spaces_and_arrows() {
        assert!(node("my node[x]").is_none());
        assert!(node("A[x] --> B[y]").is_none());
        assert!(node("A[unterminated").is_none());
    }

    #[test]
    fn test_empty_node_label() {
        let parsed = node("A[]").unwrap();
        assert_eq!(parsed.label, "");
    }

    #[test]
    fn test_plain_edges_for_every_arrow() {
        let cases = [
            ("A --> B", ArrowType::Arrow),
            ("A ==> B", ArrowType::Thick),
            ("A -.-> B", ArrowType::Dotted),
            ("A ~~~ B", ArrowType::Invisible),
            ("A <--> B", ArrowType::Bidirectional),
            ("A <==> B", ArrowType::BidirectionalThick),
        ];
        for (line, arrow) in cases {
            let parsed = edge(line).unwrap_or_else(|| panic!("no match for {line}"));
            assert_eq!(parsed.arrow, arrow, "{line}");
            assert_eq!(parsed.from.id, "A");
            assert_eq!(parsed.to.id, "B");
            assert_eq!(parsed.label, "");
        }
    }

    #[test]
    fn test_labeled_edges() {
        let cases = [
            ("A -->|yes| B", ArrowType::Arrow),
            ("A -- yes --> B", ArrowType::Arrow),
            ("A ==>|yes| B", ArrowType::Thick),
            ("A == yes ==> B", ArrowType::Thick),
            ("A -. yes .-> B", ArrowType::Dotted),
            ("A -.->|yes| B", ArrowType::Dotted),
            ("A ~~~|yes| B", ArrowType::Invisible),
            ("A <-->|yes| B", ArrowType::Bidirectional),
            ("A <-- yes --> B", ArrowType::Bidirectional),
            ("A <==yes==> B", ArrowType::BidirectionalThick),
        ];
        for (line, arrow) in cases {
            let parsed = edge(line).unwrap_or_else(|| panic!("no match for {line}"));
            assert_eq!(parsed.arrow, arrow, "{line}");
            assert_eq!(parsed.label, "yes", "{line}");
        }
    }

    #[test]
    fn test_edges_without_spaces() {
        let parsed = edge("A-->B").unwrap();
        assert_eq!((parsed.from.id.as_str(), parsed.to.id.as_str()), ("A", "B"));

        let parsed = edge("A<==>B").unwrap();
        assert_eq!(parsed.arrow, ArrowType::BidirectionalThick);
    }

    #[test]
    fn test_longer_connectors_win() {
        assert_eq!(edge("A <--> B").unwrap().pattern, "bidirectional");
        assert_eq!(edge("A -.-> B").unwrap().pattern, "dotted");
        assert_eq!(edge("A <==> B").unwrap().pattern, "bidirectional-thick");
        assert_eq!(
            edge("A <==x==> B").unwrap().pattern,
            "bidirectional-thick-side-label"
        );
    }

    #[test]
    fn test_quoted_labels_are_unquoted() {
        let parsed = edge(r#"A -->|"a, b"| B"#).unwrap();
        assert_eq!(parsed.label, "a, b");

        let parsed = edge(r#"A -. "x.y" .-> B"#).unwrap();
        assert_eq!(parsed.label, "x.y");

        let parsed = edge(r#"A <=="say \"hi\""==> B"#).unwrap();
        assert_eq!(parsed.label, "say \"hi\"");
    }

    #[test]
    fn test_chained_edges_match_nothing() {
        for line in [
            "A-->B-->C",
            "A --> B --> C",
            "A ==> B ==> C",
            "A -.-> B -.-> C",
            "A <==> B <==> C",
            "A -- x --> B --> C",
        ] {
            assert_eq!(edge(line), None, "{line}");
        }
    }

    #[test]
    fn test_side_label_may_not_contain_arrows() {
        assert!(is_arrow_fragment("--", "> B "));
        assert!(is_arrow_fragment("-.", "-> B -"));
        assert!(is_arrow_fragment("<==", "> B <"));
        assert!(is_arrow_fragment("--", "x ~~~ y "));
        assert!(!is_arrow_fragment("--", "yes "));
        assert!(!is_arrow_fragment("-.", "-x "));
        assert!(!is_arrow_fragment("-.", "\"x.y\" "));
    }

    #[test]
    fn test_side_label_with_leading_dash() {
        let parsed = edge("A -. -x .-> B").unwrap();
        assert_eq!(parsed.arrow, ArrowType::Dotted);
        assert_eq!(parsed.label, "-x");

        let parsed = edge("A <==-x==> B").unwrap();
        assert_eq!(parsed.arrow, ArrowType::BidirectionalThick);
        assert_eq!(parsed.label, "-x");
    }

    #[test]
    fn test_pipe_label_ending_in_backslash() {
        let parsed = edge(r#"A -->|"a\"| B"#).unwrap();
        assert_eq!(parsed.label, "a\\");

        let parsed = edge(r#"A <-->|"a\"| B"#).unwrap();
        assert_eq!(parsed.label, "a\\");

        let parsed = edge(r#"A ~~~|"a\"| B"#).unwrap();
        assert_eq!(parsed.label, "a\\");
    }

    #[test]
    fn test_pipe_label_is_trimmed() {
        assert_eq!(edge("A -->| spaced | B").unwrap().label, "spaced");
        assert_eq!(edge("A --> |gap| B").unwrap().label, "gap");
    }

    #[test]
    fn test_decorated_endpoints() {
        let parsed = edge("A[Start] --> B((End))").unwrap();
        assert_eq!(parsed.from.id, "A");
        assert_eq!(
            parsed.from.decoration,
            Some((NodeShape::Rectangle, "Start".to_string()))
        );
        assert_eq!(
            parsed.to.decoration,
            Some((NodeShape::Circle, "End".to_string()))
        );

        let parsed = edge("A([in]) -->|go| B{{hex}}").unwrap();
        assert_eq!(
            parsed.from.decoration,
            Some((NodeShape::Stadium, "in".to_string()))
        );
        assert_eq!(
            parsed.to.decoration,
            Some((NodeShape::Hexagon, "hex".to_string()))
        );
        assert_eq!(parsed.label, "go");
    }

    #[test]
    fn test_malformed_edges() {
        assert!(edge("A --- B").is_none());
        assert!(edge("A --> ").is_none());
        assert!(edge("--> B").is_none());
        assert!(edge("A -- B").is_none());
        assert!(edge("A <-> B").is_none());
    }

    #[test]
    fn test_pattern_table_order() {
        let names: Vec<_> = EDGE_PATTERNS.iter().map(|p| p.name).collect();
        let position = |name: &str| names.iter().position(|n| *n == name).unwrap();

        assert!(position("bidirectional") < position("arrow"));
        assert!(position("bidirectional-thick") < position("thick"));
        assert!(position("dotted") < position("arrow"));
        assert!(position("arrow-pipe-label") < position("arrow-side-label"));
        assert!(position("arrow-side-label") < position("arrow"));
        assert_eq!(names.last(), Some(&"arrow"));
    }
}
