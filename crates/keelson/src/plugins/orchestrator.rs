//! Diagram type detection and dispatch
//!
//! The orchestrator picks a diagram family for arbitrary Mermaid text and
//! routes it through that family's parser and generator:
//! Detector → Parser → Graph → Generator

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{Detector, DiagramError, Direction, Generator, Parser};
use crate::plugins::er::{ErDetector, ErGenerator, ErGraph, ErParser};
use crate::plugins::flowchart::{
    detect_direction, FlowchartDetector, FlowchartGenerator, FlowchartGraph, FlowchartParser,
};

/// Supported diagram families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Flowchart,
    Er,
}

impl DiagramKind {
    /// Detection order: the ER header is mandatory, so ER is tried first
    pub const ALL: [DiagramKind; 2] = [DiagramKind::Er, DiagramKind::Flowchart];

    pub fn name(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Er => "er",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "Flowchart with shaped nodes and typed arrows",
            DiagramKind::Er => "Entity-relationship diagram with tables and cardinalities",
        }
    }

    pub fn detector(&self) -> Box<dyn Detector> {
        match self {
            DiagramKind::Flowchart => Box::new(FlowchartDetector::new()),
            DiagramKind::Er => Box::new(ErDetector::new()),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiagramKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flowchart" | "graph" => Ok(DiagramKind::Flowchart),
            "er" | "erdiagram" => Ok(DiagramKind::Er),
            _ => Err(DiagramError::unknown_diagram_type(s)),
        }
    }
}

/// A parsed document of either family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedDiagram {
    Flowchart {
        direction: Direction,
        #[serde(flatten)]
        graph: FlowchartGraph,
    },
    Er {
        #[serde(flatten)]
        graph: ErGraph,
    },
}

impl ParsedDiagram {
    pub fn kind(&self) -> DiagramKind {
        match self {
            ParsedDiagram::Flowchart { .. } => DiagramKind::Flowchart,
            ParsedDiagram::Er { .. } => DiagramKind::Er,
        }
    }

    /// True when nothing usable was parsed
    pub fn is_empty(&self) -> bool {
        use crate::core::Database;
        match self {
            ParsedDiagram::Flowchart { graph, .. } => graph.is_empty(),
            ParsedDiagram::Er { graph } => graph.is_empty(),
        }
    }
}

/// Orchestrator that coordinates detection, parsing and generation
pub struct Orchestrator {
    detectors: IndexMap<DiagramKind, Box<dyn Detector>>,
}

impl Orchestrator {
    /// Create an orchestrator without detectors
    pub fn new() -> Self {
        Self {
            detectors: IndexMap::new(),
        }
    }

    /// Create an orchestrator with every supported detector, ER first
    pub fn with_default_detectors() -> Self {
        let mut orchestrator = Self::new();
        for kind in DiagramKind::ALL {
            orchestrator.register_detector(kind, kind.detector());
        }
        orchestrator
    }

    /// Register a detector; detectors are consulted in registration order
    pub fn register_detector(&mut self, kind: DiagramKind, detector: Box<dyn Detector>) {
        self.detectors.insert(kind, detector);
    }

    /// Registered diagram kinds, in detection order
    pub fn detectors(&self) -> Vec<DiagramKind> {
        self.detectors.keys().copied().collect()
    }

    /// Detect the diagram family of `input`
    pub fn detect_diagram_type(&self, input: &str) -> Result<DiagramKind, DiagramError> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        for (kind, detector) in &self.detectors {
            let confidence = detector.confidence(input);
            trace!(detector = %kind, confidence, "Checking detector");
            if detector.detect(input) {
                info!(detector = %kind, confidence, "Detected diagram type");
                return Ok(*kind);
            }
        }

        warn!("No suitable detector found for input");
        Err(DiagramError::detection_error(
            "No suitable detector found for input",
        ))
    }

    /// Detect, then parse
    pub fn parse(&self, input: &str) -> Result<ParsedDiagram, DiagramError> {
        let kind = self.detect_diagram_type(input)?;
        Ok(self.parse_as(kind, input))
    }

    /// Parse `input` as a known diagram family
    pub fn parse_as(&self, kind: DiagramKind, input: &str) -> ParsedDiagram {
        let parse_span = span!(Level::DEBUG, "pipeline_parse", kind = %kind);
        let _enter = parse_span.enter();

        match kind {
            DiagramKind::Flowchart => {
                let mut graph = FlowchartGraph::new();
                FlowchartParser::new().parse(input, &mut graph);
                ParsedDiagram::Flowchart {
                    direction: detect_direction(input).unwrap_or_default(),
                    graph,
                }
            }
            DiagramKind::Er => {
                let mut graph = ErGraph::new();
                ErParser::new().parse(input, &mut graph);
                ParsedDiagram::Er { graph }
            }
        }
    }

    /// Serialize a parsed document back to Mermaid text
    pub fn generate(&self, diagram: &ParsedDiagram) -> String {
        match diagram {
            ParsedDiagram::Flowchart { direction, graph } => {
                FlowchartGenerator::with_direction(*direction).generate(graph)
            }
            ParsedDiagram::Er { graph } => ErGenerator::new().generate(graph),
        }
    }

    /// Normalize a document: detect, parse, then generate
    pub fn format(&self, input: &str) -> Result<String, DiagramError> {
        let format_span = span!(Level::INFO, "format_diagram", input_len = input.len());
        let _enter = format_span.enter();

        let diagram = self.parse(input)?;
        let output = self.generate(&diagram);
        debug!(kind = %diagram.kind(), output_len = output.len(), "Formatted diagram");
        Ok(output)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::with_default_detectors()
    }
}
