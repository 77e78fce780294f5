//! ER diagram line grammar using chumsky
//!
//! Parses single trimmed lines of a Mermaid `erDiagram`: relation lines,
//! table block openers and closers, and column lines.

use chumsky::prelude::*;

use crate::core::chumsky_utils::{inline_whitespace, inline_whitespace_required, word};

/// Attribute keywords Mermaid allows after a column name
pub const KEY_KEYWORDS: [&str; 3] = ["PK", "FK", "UK"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColumn {
    pub data_type: String,
    pub name: String,
    pub pk: bool,
    pub uk: bool,
    /// Everything after the name, trimmed
    pub attributes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRelation {
    pub from: String,
    /// Crow's-foot symbol as written, e.g. `||--o{`
    pub symbol: String,
    pub to: String,
    pub label: String,
}

/// One classified line of an ER diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErStatement {
    Relation(ParsedRelation),
    BlockOpen(String),
    BlockClose,
    Column(ParsedColumn),
}

/// Chumsky-based ER line parser
pub struct ChumskyErParser;

impl ChumskyErParser {
    pub fn new() -> Self {
        Self
    }

    /// Classify a trimmed line. Column lines are only recognized inside a
    /// table block; relations are recognized anywhere.
    pub fn parse_line(&self, line: &str, in_block: bool) -> Option<ErStatement> {
        if let Some(relation) = self.parse_relation(line) {
            return Some(ErStatement::Relation(relation));
        }
        if let Some(name) = self.parse_block_open(line) {
            return Some(ErStatement::BlockOpen(name));
        }
        if !in_block {
            return None;
        }
        if line == "}" {
            return Some(ErStatement::BlockClose);
        }
        self.parse_column(line).map(ErStatement::Column)
    }

    /// `NAME ws SYMBOL ws NAME ws* : label`
    pub fn parse_relation(&self, line: &str) -> Option<ParsedRelation> {
        word()
            .then_ignore(inline_whitespace_required())
            .then(Self::cardinality_symbol())
            .then_ignore(inline_whitespace_required())
            .then(word())
            .then_ignore(inline_whitespace())
            .then_ignore(just(':'))
            .then(any().repeated().to_slice())
            .then_ignore(end())
            .parse(line)
            .into_result()
            .ok()
            .map(|(((from, symbol), to), tail)| ParsedRelation {
                from: from.to_string(),
                symbol: symbol.to_string(),
                to: to.to_string(),
                label: relation_label(tail),
            })
    }

    /// `NAME {` with anything after the brace
    pub fn parse_block_open(&self, line: &str) -> Option<String> {
        word()
            .then_ignore(inline_whitespace())
            .then_ignore(just('{'))
            .then_ignore(any().repeated())
            .then_ignore(end())
            .parse(line)
            .into_result()
            .ok()
            .map(str::to_string)
    }

    /// `type name attributes...`
    ///
    /// `PK` and `UK` are found anywhere in the attribute tail, so
    /// `PK, FK` and `"PK of table"` both mark a primary key. A tail with two
    /// separate keywords (`PK UK`) is not Mermaid syntax and drops the line.
    pub fn parse_column(&self, line: &str) -> Option<ParsedColumn> {
        let data_type = any()
            .filter(|c: &char| c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | ')' | ','))
            .repeated()
            .at_least(1)
            .to_slice();

        data_type
            .then_ignore(inline_whitespace_required())
            .then(word())
            .then(any().repeated().to_slice())
            .then_ignore(end())
            .parse(line)
            .into_result()
            .ok()
            .filter(|(_, tail)| keyword_count(tail) < 2)
            .map(|((data_type, name), tail)| ParsedColumn {
                data_type: data_type.to_string(),
                name: name.to_string(),
                pk: tail.contains("PK"),
                uk: tail.contains("UK"),
                attributes: tail.trim().to_string(),
            })
    }

    /// Run of crow's-foot characters with at least one marker; a bare `--`
    /// is not a relation
    fn cardinality_symbol<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
        one_of("|}o-{")
            .repeated()
            .at_least(1)
            .to_slice()
            .filter(|symbol: &&str| symbol.chars().any(|c| c != '-'))
    }
}

impl Default for ChumskyErParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of whitespace-separated words in `tail` that are key keywords
fn keyword_count(tail: &str) -> usize {
    tail.split_whitespace()
        .filter(|token| KEY_KEYWORDS.contains(token))
        .count()
}

/// Strip quotes, colons and whitespace around a relation label
fn relation_label(tail: &str) -> String {
    tail.trim_matches(|c: char| c == '"' || c == ':' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ChumskyErParser {
        ChumskyErParser::new()
    }

    #[test]
    fn test_relation() {
        let relation = parser()
            .parse_relation(r#"CUSTOMER ||--o{ ORDER : "places""#)
            .unwrap();
        assert_eq!(relation.from, "CUSTOMER");
        assert_eq!(relation.symbol, "||--o{");
        assert_eq!(relation.to, "ORDER");
        assert_eq!(relation.label, "places");
    }

    #[test]
    fn test_relation_label_is_stripped() {
        let relation = parser().parse_relation("A }o--o{ B:  :has: ").unwrap();
        assert_eq!(relation.label, "has");

        let relation = parser().parse_relation("A ||--|| B :").unwrap();
        assert_eq!(relation.label, "");
    }

    #[test]
    fn test_relation_rejects_plain_dashes() {
        assert!(parser().parse_relation("A -- B : label").is_none());
        assert!(parser().parse_relation("A ||--o{ B").is_none());
        assert!(parser().parse_relation("A||--o{B : x").is_none());
    }

    #[test]
    fn test_unknown_symbol_shapes_still_parse() {
        let relation = parser().parse_relation("A |o--o| B : x").unwrap();
        assert_eq!(relation.symbol, "|o--o|");

        let relation = parser().parse_relation("A |--| B : x").unwrap();
        assert_eq!(relation.symbol, "|--|");

        let relation = parser().parse_relation("A }|--|{ B : x").unwrap();
        assert_eq!(relation.symbol, "}|--|{");

        assert!(parser().parse_relation("A --- B : x").is_none());
    }

    #[test]
    fn test_block_open() {
        assert_eq!(parser().parse_block_open("USER {"), Some("USER".to_string()));
        assert_eq!(parser().parse_block_open("USER{"), Some("USER".to_string()));
        assert_eq!(parser().parse_block_open("USER"), None);
        assert_eq!(parser().parse_block_open("my table {"), None);
    }

    #[test]
    fn test_columns() {
        let column = parser().parse_column("int id PK").unwrap();
        assert_eq!(column.data_type, "int");
        assert_eq!(column.name, "id");
        assert!(column.pk);
        assert!(!column.uk);

        let column = parser().parse_column("decimal(10,2) price").unwrap();
        assert_eq!(column.data_type, "decimal(10,2)");
        assert!(!column.pk && !column.uk);
        assert_eq!(column.attributes, "");

        let column = parser()
            .parse_column(r#"string email UK "login name""#)
            .unwrap();
        assert!(column.uk);
        assert_eq!(column.attributes, r#"UK "login name""#);

        let column = parser().parse_column("int user_id FK").unwrap();
        assert!(!column.pk && !column.uk);
    }

    #[test]
    fn test_column_attribute_tail_is_free_form() {
        let column = parser().parse_column("int user_id PK, FK").unwrap();
        assert_eq!(column.name, "user_id");
        assert!(column.pk);

        let column = parser().parse_column("string s NOT_NULL").unwrap();
        assert_eq!(column.name, "s");
        assert!(!column.pk && !column.uk);
        assert_eq!(column.attributes, "NOT_NULL");

        let column = parser().parse_column(r#"int id "PK of table""#).unwrap();
        assert!(column.pk);
    }

    #[test]
    fn test_multiple_keys_are_rejected() {
        assert!(parser().parse_column("int id PK UK").is_none());
        assert!(parser().parse_column("int id FK PK").is_none());
        assert!(parser().parse_column("int").is_none());
    }

    #[test]
    fn test_line_classification() {
        let p = parser();
        assert_eq!(p.parse_line("}", true), Some(ErStatement::BlockClose));
        assert_eq!(p.parse_line("}", false), None);
        assert_eq!(p.parse_line("int id", false), None);
        assert!(matches!(
            p.parse_line("int id", true),
            Some(ErStatement::Column(_))
        ));
        assert!(matches!(
            p.parse_line("A ||--|| B : x", true),
            Some(ErStatement::Relation(_))
        ));
        assert_eq!(
            p.parse_line("B {", true),
            Some(ErStatement::BlockOpen("B".to_string()))
        );
    }
}
