// Test module for the transformation engine
//
// Unit tests per component plus visitor-level tests for the observable
// rewriting properties.

mod generate_tests;
mod ledger_tests;
mod rewrite_tests;
mod visitor_tests;

use crate::config::TransformationConfig;
use crate::TransformOutcome;
use parser::source::SourceFile;

/// Transform a source string with the given configuration (test helper).
pub(crate) fn run_with(input: &str, config: &TransformationConfig) -> TransformOutcome {
    let source = SourceFile::new("test.cpp", input);
    crate::transform_source(&source, config)
        .unwrap_or_else(|e| panic!("parse failed for {:?}: {:?}", input, e))
}

/// Transform with the default configuration (subscripts only).
pub(crate) fn run_default(input: &str) -> TransformOutcome {
    run_with(input, &TransformationConfig::default())
}

/// Configuration with every binary category enabled.
pub(crate) fn all_binary_ops() -> TransformationConfig {
    TransformationConfig {
        transform_arithmetic_operators: true,
        transform_assignment_operators: true,
        transform_comparison_operators: true,
        ..TransformationConfig::default()
    }
}
