//! Core detector trait for diagram type identification

/// Core trait for diagram type detectors
///
/// Each diagram family provides a detector that recognizes its headers and
/// connector syntax.
///
/// # Example
/// ```
/// use keelson::core::Detector;
/// use keelson::plugins::flowchart::FlowchartDetector;
///
/// let detector = FlowchartDetector::new();
/// assert!(detector.detect("flowchart TD\n    A --> B"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this diagram type
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the diagram type name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
