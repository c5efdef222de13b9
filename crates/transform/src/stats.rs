// Transformation statistics
//
// Owned by one visitor per run; reset explicitly between runs, read-only
// outside the engine.

use std::fmt;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransformationStats {
    pub array_subscripts_transformed: usize,
    pub arithmetic_ops_transformed: usize,
    pub assignment_ops_transformed: usize,
    pub comparison_ops_transformed: usize,
    pub overloaded_ops_transformed: usize,
    /// Transformations that took the runtime-dispatch path.
    pub dependent_dispatched: usize,
    pub suppressed_contexts_skipped: usize,
    pub system_headers_skipped: usize,
    pub overloaded_skipped: usize,
    pub dependent_skipped: usize,
    pub extraction_warnings: usize,
    pub errors_encountered: usize,
}

impl TransformationStats {
    pub fn total_transformed(&self) -> usize {
        self.array_subscripts_transformed
            + self.arithmetic_ops_transformed
            + self.assignment_ops_transformed
            + self.comparison_ops_transformed
            + self.overloaded_ops_transformed
    }

    pub fn reset(&mut self) {
        *self = TransformationStats::default();
    }
}

impl fmt::Display for TransformationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transformation Statistics:")?;
        writeln!(
            f,
            "  Array subscripts transformed: {}",
            self.array_subscripts_transformed
        )?;
        writeln!(
            f,
            "  Arithmetic operators transformed: {}",
            self.arithmetic_ops_transformed
        )?;
        writeln!(
            f,
            "  Assignment operators transformed: {}",
            self.assignment_ops_transformed
        )?;
        writeln!(
            f,
            "  Comparison operators transformed: {}",
            self.comparison_ops_transformed
        )?;
        writeln!(
            f,
            "  Overloaded operators transformed: {}",
            self.overloaded_ops_transformed
        )?;
        writeln!(
            f,
            "  Runtime-dispatch expressions: {}",
            self.dependent_dispatched
        )?;
        writeln!(
            f,
            "  Suppressed contexts skipped: {}",
            self.suppressed_contexts_skipped
        )?;
        writeln!(
            f,
            "  System header expressions skipped: {}",
            self.system_headers_skipped
        )?;
        writeln!(f, "  Extraction warnings: {}", self.extraction_warnings)?;
        write!(f, "  Errors encountered: {}", self.errors_encountered)
    }
}
