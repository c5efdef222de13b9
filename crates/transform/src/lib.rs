// Transformation engine: decides, per operator expression, whether to
// rewrite it through an instrumentation wrapper, synthesizes the
// replacement text, and applies conflict-free edits over the source
// buffer. The parser crate is the AST front-end; this crate never reads
// source text except through spans and the rewrite buffer.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod error_report;
pub mod generate;
pub mod ledger;
pub mod prelude;
pub mod rewrite;
pub mod stats;
pub mod visitor;

pub use analysis::{DetectionStats, OperatorScan};
pub use classify::{classify, Category, ClassifyContext, OverloadedOp, SkipReason, Verdict};
pub use config::TransformationConfig;
pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink};
pub use error::{TransformError, TransformResult};
pub use ledger::RangeLedger;
pub use rewrite::{RewriteBuffer, RewriteError};
pub use stats::TransformationStats;
pub use visitor::{RunState, TransformationVisitor};

use parser::error::ParseError;
use parser::parent::ParentMap;
use parser::source::SourceFile;
use parser::types::TypeResolver;

/// Result of transforming one source file.
#[derive(Debug)]
pub struct TransformOutcome {
    /// Full text after transformation (identical to the input when
    /// nothing qualified).
    pub text: String,
    pub changed: bool,
    pub stats: TransformationStats,
    pub diagnostics: DiagnosticSink,
}

/// Parse, resolve, transform. A parse failure is fatal for the file: the
/// errors come back to the caller and no output text is produced.
pub fn transform_source(
    source: &SourceFile,
    config: &TransformationConfig,
) -> Result<TransformOutcome, Vec<ParseError>> {
    let tu = parser::parse(source)?;
    let types = TypeResolver::resolve(&tu);
    let parents = ParentMap::build(&tu);

    let mut visitor = TransformationVisitor::new(source, &types, &parents, config);
    visitor.run(&tu);
    let (mut rewriter, stats, mut diagnostics) = visitor.into_parts();

    // Generated code references the wrapper declarations; emit the
    // include once anything was rewritten
    if rewriter.has_changes() {
        if let Some(path) = &config.prelude_path {
            let include = format!("#include \"{}\"\n", path.display());
            if let Err(e) = rewriter.insert_before(0, &include) {
                diagnostics.error(format!("failed to insert prelude include: {}", e), None);
            }
        }
    }

    let changed = rewriter.has_changes();
    Ok(TransformOutcome {
        text: rewriter.into_text(),
        changed,
        stats,
        diagnostics,
    })
}

/// Detection-only pass over a source file: count operator expressions
/// without transforming anything. Used by dry runs.
pub fn analyze_source(source: &SourceFile) -> Result<DetectionStats, Vec<ParseError>> {
    let tu = parser::parse(source)?;
    let types = TypeResolver::resolve(&tu);
    Ok(OperatorScan::analyze(&tu, &types, source))
}

#[cfg(test)]
mod tests;
