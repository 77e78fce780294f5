//! Edge geometry for the editor canvas
//!
//! Edges that share endpoints would draw their labels on top of each other.
//! This module detects the two situations where that happens and spreads the
//! labels apart:
//!
//! - cyclic groups: `A -> B` together with `B -> A`, and self-loops `A -> A`
//! - parallel groups: two or more edges with the same `(source, target)`
//!
//! Everything here works on any edge type implementing [`GraphEdge`], so
//! flowchart edges and ER relations are placed the same way.

use std::collections::{BTreeSet, HashMap};
use std::f64::consts::PI;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default distance between neighbouring labels, in canvas pixels
pub const DEFAULT_EDGE_DISTANCE: f64 = 20.0;

/// Stroke color used to highlight cyclic edges
pub const CYCLIC_STROKE: &str = "#ff6b6b";
pub const CYCLIC_STROKE_OPACITY: f64 = 0.8;
pub const CYCLIC_STROKE_WIDTH: f64 = 2.0;

/// An edge between two nodes, identified by id
pub trait GraphEdge {
    fn id(&self) -> &str;
    fn source(&self) -> &str;
    fn target(&self) -> &str;

    fn is_self_loop(&self) -> bool {
        self.source() == self.target()
    }
}

/// Label offset relative to the edge's default label position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeOffset {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl EdgeOffset {
    pub const ZERO: EdgeOffset = EdgeOffset {
        offset_x: 0.0,
        offset_y: 0.0,
    };

    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }
}

/// Label coordinates after applying an [`EdgeOffset`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPosition {
    pub adjusted_x: f64,
    pub adjusted_y: f64,
}

/// Style override for an edge; all fields empty means "no override"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl EdgeStyle {
    /// The highlight applied to cyclic edges
    pub fn cyclic_highlight() -> Self {
        Self {
            stroke: Some(CYCLIC_STROKE.to_string()),
            stroke_opacity: Some(CYCLIC_STROKE_OPACITY),
            stroke_width: Some(CYCLIC_STROKE_WIDTH),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stroke.is_none() && self.stroke_opacity.is_none() && self.stroke_width.is_none()
    }
}

/// Order-independent key of a node pair: `min-max`
fn cyclic_key(source: &str, target: &str) -> String {
    if source <= target {
        format!("{source}-{target}")
    } else {
        format!("{target}-{source}")
    }
}

/// Group edges that belong to a cycle of length one or two.
///
/// An edge `(s, t)` is cyclic when some edge `(t, s)` exists; self-loops are
/// always cyclic. Both directions share the group keyed `min(s,t)-max(s,t)`.
/// Groups keep first-seen order and list members in input order.
pub fn detect_cyclic_edges<E: GraphEdge>(edges: &[E]) -> IndexMap<String, Vec<&E>> {
    let mut targets: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for edge in edges {
        targets
            .entry(edge.source())
            .or_default()
            .insert(edge.target());
    }

    let mut groups: IndexMap<String, Vec<&E>> = IndexMap::new();
    for edge in edges {
        let reversed = targets
            .get(edge.target())
            .is_some_and(|back| back.contains(edge.source()));
        if reversed {
            groups
                .entry(cyclic_key(edge.source(), edge.target()))
                .or_default()
                .push(edge);
        }
    }

    groups
}

/// Group edges with an identical `(source, target)` pair, keyed `s->t`.
///
/// Only groups with at least two members are returned.
pub fn detect_parallel_edges<E: GraphEdge>(edges: &[E]) -> IndexMap<String, Vec<&E>> {
    let mut groups: IndexMap<String, Vec<&E>> = IndexMap::new();
    for edge in edges {
        groups
            .entry(format!("{}->{}", edge.source(), edge.target()))
            .or_default()
            .push(edge);
    }

    groups.retain(|_, members| members.len() >= 2);
    groups
}

fn position_in<E: GraphEdge>(group: &[&E], edge: &E) -> Option<usize> {
    group.iter().position(|member| member.id() == edge.id())
}

/// Label offset for `edge` given every edge on the canvas.
///
/// Cyclic placement takes priority over parallel placement; an edge in
/// neither kind of group is not moved.
pub fn calculate_edge_offset<E: GraphEdge>(edge: &E, all_edges: &[E], distance: f64) -> EdgeOffset {
    let cyclic = detect_cyclic_edges(all_edges);
    let cyclic_group = cyclic.get(&cyclic_key(edge.source(), edge.target()));
    if let Some((index, count)) =
        cyclic_group.and_then(|group| position_in(group, edge).map(|i| (i, group.len())))
    {
        return if edge.is_self_loop() {
            self_loop_offset(index, count, distance)
        } else {
            cyclic_pair_offset(edge, index, distance)
        };
    }

    let parallel = detect_parallel_edges(all_edges);
    let parallel_group = parallel.get(&format!("{}->{}", edge.source(), edge.target()));
    if let Some((index, count)) =
        parallel_group.and_then(|group| position_in(group, edge).map(|i| (i, group.len())))
    {
        let centered = index as f64 - (count as f64 - 1.0) / 2.0;
        return EdgeOffset::new(0.0, centered * distance);
    }

    EdgeOffset::ZERO
}

/// Spread self-loops evenly on circles of growing radius
fn self_loop_offset(index: usize, count: usize, distance: f64) -> EdgeOffset {
    let radius = distance * (1.0 + index as f64);
    let angle = 2.0 * PI * index as f64 / count as f64;
    EdgeOffset::new(angle.cos() * radius, angle.sin() * radius)
}

/// Alternate sides for the edges of a two-node cycle
fn cyclic_pair_offset<E: GraphEdge>(edge: &E, index: usize, distance: f64) -> EdgeOffset {
    let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
    let magnitude = (index / 2 + 1) as f64 * distance;
    let offset = sign * magnitude;

    let offset_x = if edge.target() > edge.source() {
        offset
    } else {
        -offset
    };
    EdgeOffset::new(offset_x, offset)
}

/// Move a label at `(x, y)` by the offset of the first edge connecting
/// `source` to `target`; coordinates pass through when there is none
pub fn adjust_edge_label_position<E: GraphEdge>(
    source: &str,
    target: &str,
    x: f64,
    y: f64,
    all_edges: &[E],
    distance: f64,
) -> LabelPosition {
    let Some(edge) = all_edges
        .iter()
        .find(|e| e.source() == source && e.target() == target)
    else {
        return LabelPosition {
            adjusted_x: x,
            adjusted_y: y,
        };
    };

    let offset = calculate_edge_offset(edge, all_edges, distance);
    LabelPosition {
        adjusted_x: x + offset.offset_x,
        adjusted_y: y + offset.offset_y,
    }
}

/// Highlight style for a cyclic edge when `enabled`, otherwise no override
pub fn cyclic_edge_style<E: GraphEdge>(edge: &E, all_edges: &[E], enabled: bool) -> EdgeStyle {
    if !enabled {
        return EdgeStyle::default();
    }

    let groups = detect_cyclic_edges(all_edges);
    let in_cycle = groups
        .get(&cyclic_key(edge.source(), edge.target()))
        .is_some_and(|group| position_in(group, edge).is_some());

    if in_cycle {
        EdgeStyle::cyclic_highlight()
    } else {
        EdgeStyle::default()
    }
}
