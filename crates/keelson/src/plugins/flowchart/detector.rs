//! Flowchart detector implementation
//!
//! Detects flowchart diagram syntax patterns.

use crate::core::Detector;
use tracing::{debug, trace};

use super::chumsky_parser::{ChumskyFlowchartParser, ARROW_TOKENS};

/// Flowchart detector implementation
pub struct FlowchartDetector;

const HEADERS: [&str; 2] = ["flowchart", "graph"];
const DIRECTIONS: [&str; 5] = [" TD", " TB", " LR", " RL", " BT"];

impl FlowchartDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlowchartDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn has_header(input: &str) -> bool {
    input.lines().map(str::trim).any(|line| {
        HEADERS
            .iter()
            .any(|header| line == *header || line.starts_with(&format!("{header} ")))
    })
}

/// A header-less chart made only of node lines, e.g. `A[Start]`. Bare
/// identifiers alone are too weak a signal and do not count.
fn has_shaped_node(input: &str) -> bool {
    let chumsky = ChumskyFlowchartParser::new();
    input.lines().map(str::trim).any(|line| {
        chumsky
            .parse_node_definition(line)
            .is_some_and(|node| node.id != line)
    })
}

impl Detector for FlowchartDetector {
    fn detect(&self, input: &str) -> bool {
        let input = input.trim();
        trace!(input_len = input.len(), "FlowchartDetector::detect called");

        if input.is_empty() || input.starts_with("erDiagram") {
            return false;
        }

        if has_header(input) {
            debug!("Detected flowchart via header");
            return true;
        }

        if ARROW_TOKENS.iter().any(|token| input.contains(token)) {
            debug!("Detected flowchart via arrow tokens");
            return true;
        }

        if has_shaped_node(input) {
            debug!("Detected flowchart via node definitions");
            return true;
        }

        trace!("No flowchart patterns detected");
        false
    }

    fn confidence(&self, input: &str) -> f64 {
        let input = input.trim();
        if input.is_empty() || input.starts_with("erDiagram") {
            return 0.0;
        }

        let mut score: f64 = 0.0;
        if has_header(input) {
            score += 0.6;
            if DIRECTIONS.iter().any(|direction| input.contains(direction)) {
                score += 0.2;
            }
        }

        let arrow_count: usize = ARROW_TOKENS
            .iter()
            .map(|token| input.matches(token).count())
            .sum();
        score += 0.15 * (arrow_count as f64).min(3.0);

        if score == 0.0 && has_shaped_node(input) {
            score += 0.2;
        }

        if input.contains('[') && input.contains(']') {
            score += 0.1;
        }
        if input.contains('{') && input.contains('}') {
            score += 0.1;
        }

        score.min(1.0)
    }

    fn diagram_type(&self) -> &'static str {
        "flowchart"
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = HEADERS.to_vec();
        patterns.extend(ARROW_TOKENS);
        patterns
    }
}
