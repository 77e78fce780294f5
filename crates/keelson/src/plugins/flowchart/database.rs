//! Flowchart graph model
//!
//! Nodes and edges exactly as the editor holds them. Serialized field names
//! follow the editor's JSON (`variableName`, `shapeType`, `arrowType`).

use serde::{Deserialize, Serialize};

use crate::core::{ArrowType, Database, DiagramError, GraphEdge, NodeShape};

/// A flowchart node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Unique identifier
    pub id: String,
    /// Name written to Mermaid; `None` means `node{id}` at generation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    /// Text shown inside the shape
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "shapeType")]
    pub shape: NodeShape,
}

impl FlowNode {
    /// Create a rectangle node whose variable name is its id
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            variable_name: Some(id.clone()),
            id,
            label: label.into(),
            shape: NodeShape::Rectangle,
        }
    }

    /// Create a node with a specific shape
    pub fn with_shape(id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            shape,
            ..Self::new(id, label)
        }
    }

    /// Replace the variable name
    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = Some(name.into());
        self
    }
}

/// A flowchart edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub arrow_type: ArrowType,
}

impl FlowEdge {
    /// Create an unlabeled arrow
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: String::new(),
            arrow_type: ArrowType::Arrow,
        }
    }

    pub fn with_arrow(mut self, arrow_type: ArrowType) -> Self {
        self.arrow_type = arrow_type;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl GraphEdge for FlowEdge {
    fn id(&self) -> &str {
        &self.id
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }
}

/// Flowchart graph: nodes and edges in editor order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowchartGraph {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowchartGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    /// Edges leaving `node_id`
    pub fn outgoing(&self, node_id: &str) -> impl Iterator<Item = &FlowEdge> {
        let node_id = node_id.to_string();
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// Edges entering `node_id`
    pub fn incoming(&self, node_id: &str) -> impl Iterator<Item = &FlowEdge> {
        let node_id = node_id.to_string();
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, id: &str) -> Option<FlowNode> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        self.edges.retain(|e| e.source != id && e.target != id);
        Some(self.nodes.remove(index))
    }

    /// Decode a graph from the editor's JSON
    pub fn from_json(json: &str) -> Result<Self, DiagramError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the graph as JSON
    pub fn to_json(&self) -> Result<String, DiagramError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Database for FlowchartGraph {
    type Node = FlowNode;
    type Edge = FlowEdge;

    fn add_node(&mut self, node: FlowNode) {
        self.nodes.push(node);
    }

    fn add_edge(&mut self, edge: FlowEdge) {
        self.edges.push(edge);
    }

    fn get_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
