//! ER diagram plugin
//!
//! Mermaid `erDiagram` text to [`ErGraph`] and back.

mod chumsky_parser;
mod database;
mod detector;
mod generator;
mod parser;

pub use chumsky_parser::{
    ChumskyErParser, ErStatement, ParsedColumn, ParsedRelation, KEY_KEYWORDS,
};
pub use database::*;
pub use detector::*;
pub use generator::*;
pub use parser::*;
