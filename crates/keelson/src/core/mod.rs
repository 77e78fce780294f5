//! Core abstractions shared by every diagram family
//!
//! Traits for databases, parsers, generators and detectors, the closed
//! vocabularies of shapes, arrows and cardinalities with their Mermaid codecs,
//! the identifier sanitizer and the edge geometry engine.

pub mod chumsky_utils;
mod codec;
mod database;
mod detector;
mod error;
mod generator;
mod geometry;
pub mod logging;
mod parser;
mod sanitize;
mod types;

pub use codec::*;
pub use database::*;
pub use detector::*;
pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use parser::*;
pub use sanitize::*;
pub use types::*;
