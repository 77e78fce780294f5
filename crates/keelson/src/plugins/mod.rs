//! Plugin implementations for the supported diagram families
//!
//! Each plugin implements the core traits for its diagram type: a graph
//! database, a parser, a generator and a detector.

pub mod er;
pub mod flowchart;
pub mod orchestrator;

pub use er::*;
pub use flowchart::*;
pub use orchestrator::*;
