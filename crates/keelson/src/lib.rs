//! Keelson - Mermaid text ⇄ graph model translation
//!
//! Parses Mermaid flowcharts and ER diagrams into plain graph structures a
//! visual editor can manipulate, and generates round-trippable Mermaid text
//! from those structures. Also computes label offsets for edges that would
//! otherwise overlap (cycles, self-loops, parallel edges).
//!
//! # Quick Start
//!
//! ```rust
//! use keelson::{generate_flowchart, parse_flowchart, Direction};
//!
//! let graph = parse_flowchart("flowchart TD\n    A[Start] --> B{OK?}");
//! assert_eq!(graph.nodes.len(), 2);
//!
//! let text = generate_flowchart(&graph, Direction::TopDown);
//! assert_eq!(text, "flowchart TD\n    A[Start]\n    B{OK?}\n    A --> B\n");
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use keelson::prelude::*;
//!
//! let mut graph = ErGraph::new();
//! ErParser::new().parse("erDiagram\n  USER ||--o{ ORDER : places", &mut graph);
//! assert_eq!(graph.node_count(), 2);
//!
//! let text = ErGenerator::new().generate(&graph);
//! assert!(text.ends_with("USER ||--o{ ORDER : places"));
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use plugins::orchestrator::{DiagramKind, Orchestrator, ParsedDiagram};

use crate::plugins::er::{ErGenerator, ErGraph, ErParser, Relation, Table};
use crate::plugins::flowchart::{FlowchartGenerator, FlowchartGraph, FlowchartParser};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ArrowType, Cardinality, Database, Detector, DiagramError, Direction, EdgeOffset,
        EdgeStyle, Generator, GraphEdge, NodeShape, Parser,
    };
    pub use crate::plugins::er::{
        Column, ErDetector, ErGenerator, ErGraph, ErParser, Relation, Table,
    };
    pub use crate::plugins::flowchart::{
        FlowEdge, FlowNode, FlowchartDetector, FlowchartGenerator, FlowchartGraph,
        FlowchartParser,
    };
    pub use crate::plugins::orchestrator::{DiagramKind, Orchestrator, ParsedDiagram};
}

/// Parse Mermaid flowchart text. Never fails; unrecognized lines are dropped.
///
/// # Example
/// ```rust
/// use keelson::{parse_flowchart, ArrowType};
///
/// let graph = parse_flowchart("A -. maybe .-> B");
/// assert_eq!(graph.edges[0].arrow_type, ArrowType::Dotted);
/// assert_eq!(graph.edges[0].label, "maybe");
/// ```
pub fn parse_flowchart(input: &str) -> FlowchartGraph {
    let mut graph = FlowchartGraph::new();
    FlowchartParser::new().parse(input, &mut graph);
    graph
}

/// Generate Mermaid flowchart text with the given direction header
pub fn generate_flowchart(graph: &FlowchartGraph, direction: Direction) -> String {
    FlowchartGenerator::with_direction(direction).generate(graph)
}

/// Parse Mermaid ER text. Input without the `erDiagram` header yields an
/// empty graph.
pub fn parse_er(input: &str) -> ErGraph {
    let mut graph = ErGraph::new();
    ErParser::new().parse(input, &mut graph);
    graph
}

/// Generate Mermaid ER text from tables and relations
///
/// # Example
/// ```rust
/// assert_eq!(keelson::generate_er(&[], &[]), "erDiagram");
/// ```
pub fn generate_er(tables: &[Table], relations: &[Relation]) -> String {
    let graph = ErGraph {
        tables: tables.to_vec(),
        relations: relations.to_vec(),
    };
    ErGenerator::new().generate(&graph)
}

/// Label offset of `edge` among `all_edges`; `distance` defaults to
/// [`DEFAULT_EDGE_DISTANCE`]
pub fn compute_edge_offset<E: GraphEdge>(
    edge: &E,
    all_edges: &[E],
    distance: Option<f64>,
) -> EdgeOffset {
    calculate_edge_offset(edge, all_edges, distance.unwrap_or(DEFAULT_EDGE_DISTANCE))
}
