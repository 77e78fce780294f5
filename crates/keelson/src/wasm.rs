//! WebAssembly bindings for Keelson
//!
//! Browser-facing wrappers around the public API. Graphs and geometry results
//! cross the boundary as JSON strings using the editor's field names; decoding
//! failures are thrown as JavaScript errors.

use wasm_bindgen::prelude::*;

use crate::core::logging::{init_logging, LoggingConfig};
use crate::core::{
    adjust_edge_label_position, calculate_edge_offset, DiagramError, Direction, DEFAULT_EDGE_DISTANCE,
};
use crate::plugins::er::ErGraph;
use crate::plugins::flowchart::{FlowEdge, FlowchartGraph};
use crate::plugins::Orchestrator;

fn to_js(error: DiagramError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(e.into()))
}

fn decode_edges(edges_json: &str) -> Result<Vec<FlowEdge>, JsValue> {
    serde_json::from_str(edges_json).map_err(|e| to_js(e.into()))
}

/// Initialize WASM module
///
/// Installs the panic hook and routes tracing events to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    let _ = init_logging(LoggingConfig::default());
}

/// Parse Mermaid flowchart text into `{nodes, edges}` JSON
#[wasm_bindgen]
pub fn parse_flowchart(input: &str) -> Result<String, JsValue> {
    to_json(&crate::parse_flowchart(input))
}

/// Generate Mermaid text from `{nodes, edges}` JSON; `direction` is
/// TD, LR, RL or BT (anything else means TD)
#[wasm_bindgen]
pub fn generate_flowchart(graph_json: &str, direction: &str) -> Result<String, JsValue> {
    let graph = FlowchartGraph::from_json(graph_json).map_err(to_js)?;
    let direction: Direction = direction.parse().unwrap_or_default();
    Ok(crate::generate_flowchart(&graph, direction))
}

/// Parse Mermaid ER text into `{tables, relations}` JSON
#[wasm_bindgen]
pub fn parse_er(input: &str) -> Result<String, JsValue> {
    to_json(&crate::parse_er(input))
}

/// Generate Mermaid ER text from `{tables, relations}` JSON
#[wasm_bindgen]
pub fn generate_er(graph_json: &str) -> Result<String, JsValue> {
    let graph = ErGraph::from_json(graph_json).map_err(to_js)?;
    Ok(crate::generate_er(&graph.tables, &graph.relations))
}

/// `{offsetX, offsetY}` for the edge with `edge_id` among `edges_json`.
/// A missing or non-positive distance uses the default.
#[wasm_bindgen]
pub fn edge_offset(edge_id: &str, edges_json: &str, distance: Option<f64>) -> Result<String, JsValue> {
    let edges = decode_edges(edges_json)?;
    let edge = edges
        .iter()
        .find(|e| e.id == edge_id)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown edge: {edge_id}")))?;
    let distance = distance
        .filter(|d| *d > 0.0)
        .unwrap_or(DEFAULT_EDGE_DISTANCE);
    to_json(&calculate_edge_offset(edge, &edges, distance))
}

/// `{adjustedX, adjustedY}` for a label at `(x, y)` on the edge `source -> target`
#[wasm_bindgen]
pub fn label_position(
    source: &str,
    target: &str,
    x: f64,
    y: f64,
    edges_json: &str,
) -> Result<String, JsValue> {
    let edges = decode_edges(edges_json)?;
    to_json(&adjust_edge_label_position(
        source,
        target,
        x,
        y,
        &edges,
        DEFAULT_EDGE_DISTANCE,
    ))
}

/// Style override JSON for the edge with `edge_id`; `{}` when none applies
#[wasm_bindgen]
pub fn cyclic_edge_style(
    edge_id: &str,
    edges_json: &str,
    enabled: bool,
) -> Result<String, JsValue> {
    let edges = decode_edges(edges_json)?;
    match edges.iter().find(|e| e.id == edge_id) {
        Some(edge) => to_json(&crate::core::cyclic_edge_style(edge, &edges, enabled)),
        None => Ok("{}".to_string()),
    }
}

/// Detected diagram kind (`"flowchart"` or `"er"`)
#[wasm_bindgen]
pub fn detect_diagram(input: &str) -> Result<String, JsValue> {
    Orchestrator::default()
        .detect_diagram_type(input)
        .map(|kind| kind.to_string())
        .map_err(to_js)
}
