// Transformation visitor
//
// Drives one post-order traversal of a translation unit. Children are
// visited before their parent, so by the time a parent extracts operand
// text the buffer already holds the rewritten form of its children; a
// pre-order traversal would capture stale, un-instrumented operand text.
//
// Per-node flow: classify -> (skip | ledger check -> extract -> generate
// -> commit -> bookkeep). Every per-node failure is recovered locally:
// the original text stays at that span and traversal continues.

use crate::classify::{classify, Category, ClassifyContext, SkipReason, Verdict};
use crate::config::TransformationConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::TransformError;
use crate::generate;
use crate::ledger::RangeLedger;
use crate::rewrite::RewriteBuffer;
use crate::stats::TransformationStats;
use parser::ast::{Expr, ExprKind, TranslationUnit};
use parser::parent::ParentMap;
use parser::source::SourceFile;
use parser::types::{Type, TypeMap};

/// Where a run currently stands. Complete is terminal even when per-node
/// errors occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Traversing,
    Complete,
}

pub struct TransformationVisitor<'a> {
    config: &'a TransformationConfig,
    source: &'a SourceFile,
    types: &'a TypeMap,
    parents: &'a ParentMap,
    rewriter: RewriteBuffer,
    ledger: RangeLedger,
    stats: TransformationStats,
    diagnostics: DiagnosticSink,
    state: RunState,
}

impl<'a> TransformationVisitor<'a> {
    pub fn new(
        source: &'a SourceFile,
        types: &'a TypeMap,
        parents: &'a ParentMap,
        config: &'a TransformationConfig,
    ) -> Self {
        Self {
            config,
            source,
            types,
            parents,
            rewriter: RewriteBuffer::new(source.text()),
            ledger: RangeLedger::new(),
            stats: TransformationStats::default(),
            diagnostics: DiagnosticSink::new(),
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn stats(&self) -> &TransformationStats {
        &self.stats
    }

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    pub fn rewriter(&self) -> &RewriteBuffer {
        &self.rewriter
    }

    /// Tear the visitor apart after a run.
    pub fn into_parts(self) -> (RewriteBuffer, TransformationStats, DiagnosticSink) {
        (self.rewriter, self.stats, self.diagnostics)
    }

    /// One full pass over the translation unit.
    pub fn run(&mut self, tu: &TranslationUnit) {
        self.state = RunState::Traversing;
        for root in tu.root_exprs() {
            self.visit_expr(root);
        }
        self.state = RunState::Complete;
    }

    /// Post-order: children first, then this node.
    fn visit_expr(&mut self, expr: &Expr) {
        for child in expr.children() {
            self.visit_expr(child);
        }
        self.handle_expr(expr);
    }

    fn handle_expr(&mut self, expr: &Expr) {
        let ctx = ClassifyContext {
            config: self.config,
            types: self.types,
            parents: self.parents,
            source: self.source,
        };
        match classify(expr, &ctx) {
            Verdict::Skip(reason) => self.record_skip(expr, reason),
            Verdict::Transform {
                category,
                dependent,
            } => {
                if self.ledger.is_processed(&expr.span) {
                    return;
                }
                match self.try_transform(expr, category, dependent) {
                    Ok(()) => {
                        self.ledger.mark_processed(&expr.span);
                        self.record_transform(category, dependent);
                    }
                    Err(TransformError::Extraction { what, span }) => {
                        self.stats.extraction_warnings += 1;
                        self.diagnostics.warning(
                            format!("could not extract source text for {}", what),
                            span,
                        );
                    }
                    Err(err) => {
                        self.stats.errors_encountered += 1;
                        let span = err.span().cloned();
                        self.diagnostics.error(err.to_string(), span);
                    }
                }
            }
        }
    }

    fn try_transform(
        &mut self,
        expr: &Expr,
        category: Category,
        dependent: bool,
    ) -> Result<(), TransformError> {
        let replacement = match (&expr.kind, category) {
            (ExprKind::Subscript { base, index }, _) => {
                let base_text = self.extract(base, "subscript base")?;
                let index_text = self.extract(index, "subscript index")?;
                let base_type = self.type_of(base);
                generate::subscript_instrumentation(&base_type, &base_text, &index_text, dependent)
            }
            (ExprKind::Binary { op, lhs, rhs }, _) => {
                let lhs_text = self.extract(lhs, "left operand")?;
                let rhs_text = self.extract(rhs, "right operand")?;
                let lhs_type = self.type_of(lhs);
                let rhs_type = self.type_of(rhs);
                generate::binary_instrumentation(
                    *op, &lhs_type, &rhs_type, &lhs_text, &rhs_text, dependent,
                )
                .map_err(|e| match e {
                    TransformError::Generation { operator, .. } => TransformError::Generation {
                        operator,
                        span: Some(expr.span.clone()),
                    },
                    other => other,
                })?
            }
            // The classifier only produces transform verdicts for the two
            // shapes above; anything else is an internal logic error
            _ => {
                return Err(TransformError::Generation {
                    operator: format!("{:?}", category),
                    span: Some(expr.span.clone()),
                });
            }
        };

        self.rewriter
            .replace(expr.span.clone(), &replacement)
            .map_err(|e| TransformError::Commit {
                details: e.to_string(),
                span: Some(expr.span.clone()),
            })
    }

    /// Operand text comes from the rewrite buffer, not the pristine
    /// source, so a parent embeds its children's already-rewritten form.
    fn extract(&self, operand: &Expr, what: &str) -> Result<String, TransformError> {
        self.rewriter
            .text_for(&operand.span)
            .map(str::to_string)
            .ok_or_else(|| TransformError::Extraction {
                what: what.to_string(),
                span: Some(operand.span.clone()),
            })
    }

    fn type_of(&self, expr: &Expr) -> Type {
        self.types.get(&expr.id).cloned().unwrap_or(Type::Unknown)
    }

    fn record_transform(&mut self, category: Category, dependent: bool) {
        match category {
            Category::Subscript => self.stats.array_subscripts_transformed += 1,
            Category::Arithmetic(_) => self.stats.arithmetic_ops_transformed += 1,
            Category::Assignment(_) => self.stats.assignment_ops_transformed += 1,
            Category::Comparison(_) => self.stats.comparison_ops_transformed += 1,
            Category::Overloaded(_) => self.stats.overloaded_ops_transformed += 1,
            Category::Unary => {}
        }
        if dependent {
            self.stats.dependent_dispatched += 1;
        }
    }

    fn record_skip(&mut self, expr: &Expr, reason: SkipReason) {
        match reason {
            SkipReason::AddressOfContext | SkipReason::SizeQueryContext => {
                self.stats.suppressed_contexts_skipped += 1;
                self.diagnostics.note(
                    format!("skipped expression transformation: {}", reason),
                    Some(expr.span.clone()),
                );
            }
            SkipReason::SystemHeader => self.stats.system_headers_skipped += 1,
            SkipReason::OverloadedByDefault => {
                self.stats.overloaded_skipped += 1;
                self.diagnostics.note(
                    format!("skipped expression transformation: {}", reason),
                    Some(expr.span.clone()),
                );
            }
            SkipReason::DependentDisabled => {
                self.stats.dependent_skipped += 1;
                self.diagnostics.note(
                    format!("skipped expression transformation: {}", reason),
                    Some(expr.span.clone()),
                );
            }
            SkipReason::CategoryDisabled | SkipReason::Unclassified => {}
        }
    }
}
