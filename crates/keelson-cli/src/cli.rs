//! Command-line interface for the keelson utility
//!
//! Converts Mermaid flowchart and ER documents to graph JSON and back.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use keelson::core::logging::{init_logging, LogFormat as CoreLogFormat, LoggingConfig};
use keelson::core::{
    calculate_edge_offset, cyclic_edge_style, EdgeOffset, EdgeStyle, GraphEdge,
    DEFAULT_EDGE_DISTANCE,
};
use keelson::plugins::er::ErGraph;
use keelson::plugins::flowchart::FlowchartGraph;
use keelson::{DiagramKind, Direction, Orchestrator, ParsedDiagram};

/// Keelson - Mermaid text to graph JSON and back
#[derive(Parser)]
#[command(name = "keelson")]
#[command(about = "Convert Mermaid flowcharts and ER diagrams to and from graph JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error); defaults to KEELSON_LOG_LEVEL
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json); defaults to KEELSON_LOG_FORMAT
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormat> for CoreLogFormat {
    fn from(value: LogFormat) -> Self {
        match value {
            LogFormat::Compact => CoreLogFormat::Compact,
            LogFormat::Pretty => CoreLogFormat::Pretty,
            LogFormat::Json => CoreLogFormat::Json,
        }
    }
}

/// Diagram family selection for `parse`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum KindChoice {
    /// Detect from the text
    #[default]
    Auto,
    Flowchart,
    Er,
}

impl KindChoice {
    pub fn kind(&self) -> Option<DiagramKind> {
        match self {
            KindChoice::Auto => None,
            KindChoice::Flowchart => Some(DiagramKind::Flowchart),
            KindChoice::Er => Some(DiagramKind::Er),
        }
    }
}

/// Layout direction for generated flowcharts
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DirectionChoice {
    Td,
    Lr,
    Rl,
    Bt,
}

impl From<DirectionChoice> for Direction {
    fn from(value: DirectionChoice) -> Self {
        match value {
            DirectionChoice::Td => Direction::TopDown,
            DirectionChoice::Lr => Direction::LeftRight,
            DirectionChoice::Rl => Direction::RightLeft,
            DirectionChoice::Bt => Direction::BottomUp,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse Mermaid text into graph JSON
    Parse {
        /// Input file containing Mermaid text (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the JSON document (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram family of the input
        #[arg(long, value_enum, default_value_t = KindChoice::Auto)]
        kind: KindChoice,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Generate Mermaid text from graph JSON
    Generate {
        /// Input file containing graph JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the Mermaid text (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read a bare `{nodes, edges}` or `{tables, relations}` graph of this
        /// family instead of a tagged `parse` document
        #[arg(long, value_enum)]
        kind: Option<GraphKind>,

        /// Flowchart direction; overrides the direction stored in the document
        #[arg(long, value_enum)]
        direction: Option<DirectionChoice>,
    },

    /// Normalize Mermaid text by parsing and regenerating it
    Format {
        /// Input file containing Mermaid text (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the normalized text (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect diagram type in input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Compute label offsets for every edge of a Mermaid document
    Offsets {
        /// Input file containing Mermaid text (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the JSON report (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base separation between overlapping edges
        #[arg(long, default_value_t = DEFAULT_EDGE_DISTANCE)]
        distance: f64,

        /// Attach the highlight style to edges that are part of a two-node cycle
        #[arg(long)]
        highlight_cycles: bool,
    },

    /// Show supported diagram types
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Diagram family of a bare graph document
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum GraphKind {
    Flowchart,
    Er,
}

/// Geometry hints for one edge, as reported by `offsets`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeGeometry {
    pub id: String,
    pub source: String,
    pub target: String,
    pub offset: EdgeOffset,
    #[serde(skip_serializing_if = "EdgeStyle::is_empty")]
    pub style: EdgeStyle,
}

/// Offsets and styles for every edge in `edges`
pub fn edge_geometry<E: GraphEdge>(
    edges: &[E],
    distance: f64,
    highlight_cycles: bool,
) -> Vec<EdgeGeometry> {
    edges
        .iter()
        .map(|edge| EdgeGeometry {
            id: edge.id().to_string(),
            source: edge.source().to_string(),
            target: edge.target().to_string(),
            offset: calculate_edge_offset(edge, edges, distance),
            style: cyclic_edge_style(edge, edges, highlight_cycles),
        })
        .collect()
}

/// Main CLI application
pub struct KeelsonApp {
    orchestrator: Orchestrator,
}

impl KeelsonApp {
    /// Create a new application instance with every detector registered
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::with_default_detectors(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        let config = LoggingConfig::new(
            cli.log_level.map(|level| level.as_str()),
            cli.log_format.map(CoreLogFormat::from),
        );
        if let Err(e) = init_logging(config) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Keelson v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Parse {
                input,
                output,
                kind,
                pretty,
            } => self.parse_command(input, output, kind, pretty, cli.verbose),
            Commands::Generate {
                input,
                output,
                kind,
                direction,
            } => self.generate_command(input, output, kind, direction, cli.verbose),
            Commands::Format { input, output } => self.format_command(input, output, cli.verbose),
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
            Commands::Offsets {
                input,
                output,
                distance,
                highlight_cycles,
            } => self.offsets_command(input, output, distance, highlight_cycles, cli.verbose),
            Commands::Types { json } => self.types_command(json, cli.verbose),
        }
    }

    /// Parse Mermaid text, detecting the family unless one is given
    pub fn parse_diagram(&self, content: &str, kind: KindChoice) -> Result<ParsedDiagram> {
        let diagram = match kind.kind() {
            Some(kind) => self.orchestrator.parse_as(kind, content),
            None => self
                .orchestrator
                .parse(content)
                .context("Could not detect diagram type")?,
        };
        Ok(diagram)
    }

    /// Render a graph JSON document as Mermaid text
    pub fn generate_text(
        &self,
        json: &str,
        kind: Option<GraphKind>,
        direction: Option<DirectionChoice>,
    ) -> Result<String> {
        let mut diagram = match kind {
            None => serde_json::from_str::<ParsedDiagram>(json)
                .context("Input is not a tagged diagram document; pass --kind for a bare graph")?,
            Some(GraphKind::Flowchart) => ParsedDiagram::Flowchart {
                direction: Direction::default(),
                graph: FlowchartGraph::from_json(json).context("Invalid flowchart graph JSON")?,
            },
            Some(GraphKind::Er) => ParsedDiagram::Er {
                graph: ErGraph::from_json(json).context("Invalid ER graph JSON")?,
            },
        };

        if let (ParsedDiagram::Flowchart { direction: stored, .. }, Some(choice)) =
            (&mut diagram, direction)
        {
            *stored = choice.into();
        }

        Ok(self.orchestrator.generate(&diagram))
    }

    /// Geometry report for every edge of a Mermaid document
    pub fn offsets_report(
        &self,
        content: &str,
        distance: f64,
        highlight_cycles: bool,
    ) -> Result<Vec<EdgeGeometry>> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(anyhow!("Distance must be a positive number, got {}", distance));
        }

        let report = match self.parse_diagram(content, KindChoice::Auto)? {
            ParsedDiagram::Flowchart { graph, .. } => {
                edge_geometry(&graph.edges, distance, highlight_cycles)
            }
            ParsedDiagram::Er { graph } => {
                edge_geometry(&graph.relations, distance, highlight_cycles)
            }
        };
        debug!(edges = report.len(), "Computed edge geometry");
        Ok(report)
    }

    fn parse_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        kind: KindChoice,
        pretty: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let diagram = self.parse_diagram(&content, kind)?;
        info!(kind = %diagram.kind(), "Parsed diagram");

        let json = if pretty {
            serde_json::to_string_pretty(&diagram)?
        } else {
            serde_json::to_string(&diagram)?
        };
        self.write_output(output, &json)
    }

    fn generate_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        kind: Option<GraphKind>,
        direction: Option<DirectionChoice>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let text = self.generate_text(&content, kind, direction)?;
        self.write_output(output, &text)
    }

    fn format_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let text = self
            .orchestrator
            .format(&content)
            .context("Could not format diagram")?;
        self.write_output(output, &text)
    }

    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let kind = self
            .orchestrator
            .detect_diagram_type(&content)
            .context("Could not detect diagram type")?;
        println!("{}", kind);
        Ok(())
    }

    fn offsets_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        distance: f64,
        highlight_cycles: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let report = self.offsets_report(&content, distance, highlight_cycles)?;
        self.write_output(output, &serde_json::to_string_pretty(&report)?)
    }

    /// Handle the types command
    fn types_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported diagram types");
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&Self::types_json())?);
        } else {
            println!("Supported diagram types:");
            for kind in DiagramKind::ALL {
                println!("  {:<10} - {}", kind.name(), kind.description());
            }
            println!();
            println!("Total: {} diagram types supported", DiagramKind::ALL.len());
        }

        Ok(())
    }

    fn types_json() -> serde_json::Value {
        let types: Vec<_> = DiagramKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "name": kind.name(),
                    "description": kind.description(),
                    "status": "supported"
                })
            })
            .collect();
        serde_json::json!({
            "supported_types": types,
            "total": DiagramKind::ALL.len()
        })
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => fs::write(&path, content)
                .with_context(|| format!("Failed to write output file '{}'", path.display())),
            _ => {
                if content.is_empty() || content.ends_with('\n') {
                    print!("{}", content);
                } else {
                    println!("{}", content);
                }
                io::stdout().flush()?;
                Ok(())
            }
        }
    }
}

impl Default for KeelsonApp {
    fn default() -> Self {
        Self::new()
    }
}
