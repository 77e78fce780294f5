//! Flowchart parser implementation
//!
//! Two passes over the trimmed statement lines. Pass 1 registers node
//! definitions, pass 2 turns edge lines into edges and synthesizes nodes for
//! endpoints that were never declared.

use indexmap::IndexMap;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::{ChumskyFlowchartParser, NodeRef};
use super::{FlowEdge, FlowNode, FlowchartGraph};
use crate::core::{Database, Direction, NodeShape, Parser};

/// Flowchart parser implementation
pub struct FlowchartParser;

impl FlowchartParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlowchartParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<FlowchartGraph> for FlowchartParser {
    fn parse(&self, input: &str, database: &mut FlowchartGraph) {
        let parse_span = span!(Level::INFO, "parse_flowchart", input_len = input.len());
        let _enter = parse_span.enter();

        if input.trim().is_empty() {
            debug!("Empty input");
            return;
        }

        let chumsky = ChumskyFlowchartParser::new();
        let lines = statement_lines(input);

        let mut registry: IndexMap<String, FlowNode> = IndexMap::new();
        for line in &lines {
            if let Some(definition) = chumsky.parse_node_definition(line) {
                trace!(id = %definition.id, shape = %definition.shape, "Node definition");
                registry.insert(
                    definition.id.clone(),
                    FlowNode::with_shape(definition.id, definition.label, definition.shape),
                );
            }
        }
        debug!(node_count = registry.len(), "Pass 1 complete");

        let mut edges = Vec::new();
        let mut skipped = 0usize;
        for line in &lines {
            let Some(definition) = chumsky.parse_edge_definition(line) else {
                if chumsky.parse_node_definition(line).is_none() {
                    trace!(line = %line, "Skipping unrecognized line");
                    skipped += 1;
                }
                continue;
            };
            trace!(pattern = definition.pattern, "Edge definition");

            register_endpoint(&mut registry, &definition.from);
            register_endpoint(&mut registry, &definition.to);

            let id = format!("e{}", edges.len() + 1);
            edges.push(
                FlowEdge::new(id, definition.from.id, definition.to.id)
                    .with_arrow(definition.arrow)
                    .with_label(definition.label),
            );
        }

        for node in registry.into_values() {
            database.add_node(node);
        }
        for edge in edges {
            database.add_edge(edge);
        }

        debug!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            skipped,
            "Parsed flowchart"
        );
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }

    fn can_parse(&self, input: &str) -> bool {
        let chumsky = ChumskyFlowchartParser::new();
        statement_lines(input).iter().any(|line| {
            chumsky.parse_edge_definition(line).is_some()
                || chumsky.parse_node_definition(line).is_some()
        })
    }
}

/// Add a rectangle node for an endpoint seen only on an edge line. The
/// decoration, if any, supplies the label but never the shape.
fn register_endpoint(registry: &mut IndexMap<String, FlowNode>, endpoint: &NodeRef) {
    if registry.contains_key(&endpoint.id) {
        return;
    }

    let label = match &endpoint.decoration {
        Some((_, label)) => label.clone(),
        None => endpoint.id.clone(),
    };
    let node = FlowNode::with_shape(endpoint.id.clone(), label, NodeShape::Rectangle);
    trace!(id = %node.id, "Synthesized node for edge endpoint");
    registry.insert(endpoint.id.clone(), node);
}

/// Trimmed, non-blank lines without comments or `flowchart`/`graph` headers
fn statement_lines(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("%%"))
        .filter(|line| !line.starts_with("flowchart") && !line.starts_with("graph"))
        .collect()
}

/// Direction of the first `flowchart`/`graph` header, if any
pub fn detect_direction(input: &str) -> Option<Direction> {
    let chumsky = ChumskyFlowchartParser::new();
    input
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("flowchart") || line.starts_with("graph"))
        .and_then(|header| chumsky.parse_header(header))
}
