//! ER diagram generator
//!
//! Emits the `erDiagram` header, one block per table and one line per
//! relation whose endpoints both resolve. Lines are joined with newlines and
//! the output has no trailing newline.

use tracing::{debug, span, trace, Level};

use super::parser::ER_HEADER;
use super::{ErGraph, DEFAULT_RELATION_LABEL};
use crate::core::{cardinality_symbol, Database, Generator};

/// ER diagram generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ErGenerator;

impl ErGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator<ErGraph> for ErGenerator {
    fn generate(&self, database: &ErGraph) -> String {
        let generate_span = span!(
            Level::INFO,
            "generate_er",
            table_count = database.node_count(),
            relation_count = database.edge_count()
        );
        let _enter = generate_span.enter();

        let mut lines = vec![ER_HEADER.to_string()];

        for table in database.nodes() {
            lines.push(format!("  {} {{", table.name));
            for column in &table.columns {
                lines.push(format!(
                    "    {} {}{}",
                    column.data_type,
                    column.name,
                    column.key_suffix()
                ));
            }
            lines.push("  }".to_string());
        }

        let mut dropped = 0usize;
        for relation in database.edges() {
            let (Some(source), Some(target)) = (
                database.get_node(&relation.source),
                database.get_node(&relation.target),
            ) else {
                trace!(relation = %relation.id, "Dropping relation with unresolved endpoint");
                dropped += 1;
                continue;
            };

            let label = if relation.label.is_empty() {
                DEFAULT_RELATION_LABEL
            } else {
                relation.label.as_str()
            };
            lines.push(format!(
                "  {} {} {} : {}",
                source.name,
                cardinality_symbol(relation.cardinality),
                target.name,
                label
            ));
        }

        debug!(dropped, "Generated ER diagram");
        lines.join("\n")
    }

    fn name(&self) -> &'static str {
        "er"
    }
}
