//! Flowchart diagram plugin
//!
//! Mermaid `flowchart`/`graph` text to [`FlowchartGraph`] and back.

mod chumsky_parser;
mod database;
mod detector;
mod generator;
mod parser;

pub use chumsky_parser::{
    ChumskyFlowchartParser, EdgeDefinition, EdgePattern, LabelSyntax, NodeDefinition, NodeRef,
    ARROW_TOKENS, EDGE_PATTERNS, NODE_SHAPE_ORDER,
};
pub use database::*;
pub use detector::*;
pub use generator::*;
pub use parser::*;
