//! ER diagram parser implementation
//!
//! Scans the lines after the `erDiagram` header, collecting table blocks and
//! relation lines. An unterminated block is dropped when the next block opens
//! or the input ends.

use indexmap::IndexMap;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::{ChumskyErParser, ErStatement, ParsedColumn};
use super::{Column, ErGraph, Relation, Table, DEFAULT_RELATION_LABEL};
use crate::core::{cardinality_from_symbol, Database, Parser};

/// Mandatory first token of an ER diagram
pub const ER_HEADER: &str = "erDiagram";

/// ER diagram parser implementation
pub struct ErParser;

impl ErParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ErParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A table block being collected
struct OpenBlock {
    name: String,
    columns: Vec<Column>,
}

impl From<ParsedColumn> for Column {
    fn from(parsed: ParsedColumn) -> Self {
        Column {
            name: parsed.name,
            data_type: parsed.data_type,
            pk: parsed.pk,
            uk: parsed.uk,
        }
    }
}

impl Parser<ErGraph> for ErParser {
    fn parse(&self, input: &str, database: &mut ErGraph) {
        let parse_span = span!(Level::INFO, "parse_er", input_len = input.len());
        let _enter = parse_span.enter();

        let trimmed = input.trim();
        if !trimmed.starts_with(ER_HEADER) {
            debug!("Missing erDiagram header");
            return;
        }

        let chumsky = ChumskyErParser::new();
        let mut tables: IndexMap<String, Table> = IndexMap::new();
        let mut relations = Vec::new();
        let mut block: Option<OpenBlock> = None;

        for line in trimmed.lines().skip(1).map(str::trim) {
            if line.is_empty() || line.starts_with("%%") {
                continue;
            }

            match chumsky.parse_line(line, block.is_some()) {
                Some(ErStatement::Relation(parsed)) => {
                    for name in [&parsed.from, &parsed.to] {
                        if !tables.contains_key(name) {
                            trace!(table = %name, "Registering table from relation");
                            tables.insert(name.clone(), Table::new(name.clone()));
                        }
                    }

                    let id = format!("r{}", relations.len() + 1);
                    let label = if parsed.label.is_empty() {
                        DEFAULT_RELATION_LABEL.to_string()
                    } else {
                        parsed.label
                    };
                    relations.push(
                        Relation::new(id, parsed.from, parsed.to)
                            .with_cardinality(cardinality_from_symbol(&parsed.symbol))
                            .with_label(label),
                    );
                }
                Some(ErStatement::BlockOpen(name)) => {
                    if let Some(abandoned) = block.take() {
                        debug!(table = %abandoned.name, "Dropping unterminated table block");
                    }
                    block = Some(OpenBlock {
                        name,
                        columns: Vec::new(),
                    });
                }
                Some(ErStatement::BlockClose) => {
                    if let Some(done) = block.take() {
                        trace!(table = %done.name, columns = done.columns.len(), "Table block");
                        tables.insert(
                            done.name.clone(),
                            Table::new(done.name).with_columns(done.columns),
                        );
                    }
                }
                Some(ErStatement::Column(parsed)) => {
                    if let Some(open) = block.as_mut() {
                        open.columns.push(parsed.into());
                    }
                }
                None => trace!(line = %line, "Skipping unrecognized line"),
            }
        }

        if let Some(abandoned) = block {
            debug!(table = %abandoned.name, "Dropping unterminated table block at end of input");
        }

        for table in tables.into_values() {
            database.add_node(table);
        }
        for relation in relations {
            database.add_edge(relation);
        }

        debug!(
            table_count = database.node_count(),
            relation_count = database.edge_count(),
            "Parsed ER diagram"
        );
    }

    fn name(&self) -> &'static str {
        "er"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.trim().starts_with(ER_HEADER)
    }
}
