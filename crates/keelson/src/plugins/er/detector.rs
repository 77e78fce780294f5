//! ER diagram detector implementation

use tracing::{debug, trace};

use super::chumsky_parser::ChumskyErParser;
use super::parser::ER_HEADER;
use crate::core::{Detector, ER_CARDINALITY_SYMBOLS};

/// ER diagram detector; the `erDiagram` header is mandatory
pub struct ErDetector;

impl ErDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ErDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ErDetector {
    fn detect(&self, input: &str) -> bool {
        let detected = input.trim().starts_with(ER_HEADER);
        trace!(detected, "ErDetector::detect called");
        detected
    }

    fn confidence(&self, input: &str) -> f64 {
        if !self.detect(input) {
            return 0.0;
        }

        let chumsky = ChumskyErParser::new();
        let relations = input
            .lines()
            .filter(|line| chumsky.parse_relation(line.trim()).is_some())
            .count();
        let blocks = input
            .lines()
            .filter(|line| chumsky.parse_block_open(line.trim()).is_some())
            .count();
        debug!(relations, blocks, "ER confidence inputs");

        (0.7 + 0.1 * (relations + blocks).min(3) as f64).min(1.0)
    }

    fn diagram_type(&self) -> &'static str {
        "er"
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = vec![ER_HEADER];
        patterns.extend(ER_CARDINALITY_SYMBOLS.iter().map(|(_, symbol)| *symbol));
        patterns
    }
}
