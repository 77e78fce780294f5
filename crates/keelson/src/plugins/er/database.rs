//! ER diagram model
//!
//! Tables with typed columns and cardinality-annotated relations between
//! them. Field names follow the editor's JSON (`type` for the column type).

use serde::{Deserialize, Serialize};

use crate::core::{Cardinality, Database, DiagramError, GraphEdge};

/// Label given to relations without one
pub const DEFAULT_RELATION_LABEL: &str = "relation";

fn default_relation_label() -> String {
    DEFAULT_RELATION_LABEL.to_string()
}

/// A table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    /// Primary key
    #[serde(default)]
    pub pk: bool,
    /// Unique key
    #[serde(default)]
    pub uk: bool,
}

impl Column {
    pub fn new(data_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            pk: false,
            uk: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.pk = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.uk = true;
        self
    }

    /// Key marker written after the column; PK wins over UK
    pub fn key_suffix(&self) -> &'static str {
        if self.pk {
            " PK"
        } else if self.uk {
            " UK"
        } else {
            ""
        }
    }
}

/// An entity with its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    /// A table whose id is its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            columns: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }
}

/// A relationship between two tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
    /// Source table id
    pub source: String,
    /// Target table id
    pub target: String,
    #[serde(default = "default_relation_label")]
    pub label: String,
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl Relation {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: default_relation_label(),
            cardinality: Cardinality::default(),
        }
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl GraphEdge for Relation {
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

/// ER graph: tables and relations in editor order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErGraph {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl ErGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a table by name
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
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

impl Database for ErGraph {
    type Node = Table;
    type Edge = Relation;

    fn add_node(&mut self, node: Table) {
        self.tables.push(node);
    }

    fn add_edge(&mut self, edge: Relation) {
        self.relations.push(edge);
    }

    fn get_node(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    fn clear(&mut self) {
        self.tables.clear();
        self.relations.clear();
    }

    fn node_count(&self) -> usize {
        self.tables.len()
    }

    fn edge_count(&self) -> usize {
        self.relations.len()
    }
}
