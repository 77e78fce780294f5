//! Core parser trait for Mermaid text

use super::Database;

/// Core trait for diagram parsers
///
/// Parsing is total: lines that match no known grammar are dropped and the
/// database simply ends up with fewer entries. An empty database is how a
/// parser reports that nothing usable was found.
pub trait Parser<D: Database>: Send + Sync {
    /// Parse `input` and append everything recognized to `database`
    fn parse(&self, input: &str, database: &mut D);

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Cheap check whether the input looks like something this parser handles
    fn can_parse(&self, input: &str) -> bool;
}
