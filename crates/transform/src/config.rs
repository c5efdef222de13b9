// Transformation configuration
//
// One immutable value object per run. No process-wide state: parallel
// per-file runs each carry their own copy.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TransformationConfig {
    /// Rewrite array subscript expressions.
    pub transform_array_subscripts: bool,
    /// Rewrite arithmetic operators (+ - * / %).
    pub transform_arithmetic_operators: bool,
    /// Rewrite assignment operators (= += -= *= /= %=).
    pub transform_assignment_operators: bool,
    /// Rewrite comparison operators (== != < > <= >=).
    pub transform_comparison_operators: bool,
    /// Rewrite operators whose operand is a user-defined record type.
    /// Off by default: such operators already run through code the user
    /// controls, and re-wrapping them must be an explicit choice.
    pub transform_overloaded_operators: bool,
    /// Process expressions with template-dependent operand types through
    /// the runtime-dispatch wrappers. When off they are left untouched.
    pub instrument_dependent_expressions: bool,
    /// Leave expressions located in library/system headers alone.
    pub skip_system_headers: bool,
    /// Header the generated code assumes; included in emitted output.
    pub prelude_path: Option<PathBuf>,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            transform_array_subscripts: true,
            transform_arithmetic_operators: false,
            transform_assignment_operators: false,
            transform_comparison_operators: false,
            transform_overloaded_operators: false,
            instrument_dependent_expressions: true,
            skip_system_headers: true,
            prelude_path: None,
        }
    }
}
