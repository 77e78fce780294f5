//! Flowchart generator
//!
//! Serializes a [`FlowchartGraph`] as Mermaid text: a `flowchart` header, one
//! line per node, then one line per edge whose endpoints both resolve.

use std::fmt::Write;

use tracing::{debug, span, trace, Level};

use super::{FlowNode, FlowchartGraph};
use crate::core::{encode_arrow, encode_shape, sanitize_identifier, Database, Direction, Generator};

const INDENT: &str = "    ";

/// Flowchart generator
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowchartGenerator {
    direction: Direction,
}

impl FlowchartGenerator {
    /// Generator for top-down charts
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Mermaid name of a node: its sanitized variable name, or `node{id}`
pub fn node_variable_name(node: &FlowNode) -> String {
    match &node.variable_name {
        Some(name) => sanitize_identifier(name),
        None => sanitize_identifier(&format!("node{}", node.id)),
    }
}

impl Generator<FlowchartGraph> for FlowchartGenerator {
    fn generate(&self, database: &FlowchartGraph) -> String {
        let generate_span = span!(
            Level::INFO,
            "generate_flowchart",
            node_count = database.node_count(),
            edge_count = database.edge_count()
        );
        let _enter = generate_span.enter();

        let mut output = format!("flowchart {}\n", self.direction);

        for node in database.nodes() {
            let _ = writeln!(
                output,
                "{INDENT}{}{}",
                node_variable_name(node),
                encode_shape(node.shape, &node.label)
            );
        }

        let mut dropped = 0usize;
        for edge in database.edges() {
            let (Some(source), Some(target)) = (
                database.get_node(&edge.source),
                database.get_node(&edge.target),
            ) else {
                trace!(edge = %edge.id, "Dropping edge with unresolved endpoint");
                dropped += 1;
                continue;
            };

            let _ = writeln!(
                output,
                "{INDENT}{}{}{}",
                node_variable_name(source),
                encode_arrow(edge.arrow_type, Some(&edge.label)),
                node_variable_name(target)
            );
        }

        debug!(dropped, direction = %self.direction, "Generated flowchart");
        output
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArrowType, NodeShape};
    use crate::plugins::flowchart::FlowEdge;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_graph() {
        let output = FlowchartGenerator::new().generate(&FlowchartGraph::new());
        assert_eq!(output, "flowchart TD\n");
    }

    #[test]
    fn test_direction_header() {
        let generator = FlowchartGenerator::with_direction(Direction::LeftRight);
        assert_eq!(generator.generate(&FlowchartGraph::new()), "flowchart LR\n");
    }

    #[test]
    fn test_nodes_and_edges() {
        let mut graph = FlowchartGraph::new();
        graph.add_node(FlowNode::new("1", "Start").with_variable_name("start"));
        graph.add_node(FlowNode::with_shape("2", "OK?", NodeShape::Diamond));
        graph.add_edge(FlowEdge::new("e1", "1", "2").with_label("next"));
        graph.add_edge(FlowEdge::new("e2", "2", "1").with_arrow(ArrowType::Dotted));

        let output = FlowchartGenerator::new().generate(&graph);
        let expected = "\
flowchart TD
    start[Start]
    _2{OK?}
    start -->|next| _2
    _2 -.-> start
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_missing_variable_name_uses_node_prefix() {
        let mut graph = FlowchartGraph::new();
        let mut node = FlowNode::new("7", "Seven");
        node.variable_name = None;
        graph.add_node(node);

        let output = FlowchartGenerator::new().generate(&graph);
        assert!(output.contains("    node7[Seven]\n"));
    }

    #[test]
    fn test_dangling_edge_is_dropped() {
        let mut graph = FlowchartGraph::new();
        graph.add_node(FlowNode::new("A", "A"));
        graph.add_edge(FlowEdge::new("e1", "A", "999"));

        let output = FlowchartGenerator::new().generate(&graph);
        assert_eq!(output, "flowchart TD\n    A[A]\n");
        assert!(!output.contains("A -->"));
        assert!(!output.contains("--> A"));
    }

    #[test]
    fn test_reserved_and_spaced_names() {
        let mut graph = FlowchartGraph::new();
        graph.add_node(FlowNode::new("end", "End"));
        graph.add_node(FlowNode::new("my node", "Mine"));
        graph.add_edge(FlowEdge::new("e1", "end", "my node").with_arrow(ArrowType::Thick));

        let output = FlowchartGenerator::new().generate(&graph);
        assert!(output.contains("    node_end[End]\n"));
        assert!(output.contains("    my_node[Mine]\n"));
        assert!(output.contains("    node_end ==> my_node\n"));
    }
}
