//! Core generator trait for Mermaid text

use super::Database;

/// Core trait for diagram generators
///
/// Generation never fails. Edges whose endpoints cannot be resolved are
/// skipped and unknown enum values have already been mapped to defaults.
pub trait Generator<D: Database>: Send + Sync {
    /// Serialize the database as Mermaid text
    fn generate(&self, database: &D) -> String;

    /// Get the name of this generator
    fn name(&self) -> &'static str;
}
