// Expression classifier
//
// A pure function from (node, context) to a verdict: transform under some
// category, or skip with a reason. Suppression rules run before any
// category match, and nothing here mutates or panics — an unrecognized
// node simply classifies as a skip.

use crate::config::TransformationConfig;
use parser::ast::{BinaryOp, Expr, ExprKind};
use parser::parent::{ParentEdge, ParentMap};
use parser::source::SourceFile;
use parser::types::{Type, TypeMap};
use std::fmt;

/// Operator category a transformable expression falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Subscript,
    Arithmetic(BinaryOp),
    Assignment(BinaryOp),
    Comparison(BinaryOp),
    /// Recognized but never transformed: no configuration enables it.
    Unary,
    Overloaded(OverloadedOp),
}

/// Which operator a user-overloaded expression invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadedOp {
    Subscript,
    Binary(BinaryOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Directly under unary &: the address is observed, not the value.
    AddressOfContext,
    /// Directly under sizeof/alignof: the operand is never evaluated.
    SizeQueryContext,
    /// Located inside a registered library/system header region.
    SystemHeader,
    /// The operator's category is not enabled by the configuration.
    CategoryDisabled,
    /// User-overloaded operator and overload transformation is off.
    OverloadedByDefault,
    /// Dependent operand type and dependent processing is off.
    DependentDisabled,
    /// Not an operator expression this tool recognizes.
    Unclassified,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::AddressOfContext => "operand of address-of",
            SkipReason::SizeQueryContext => "operand of size query",
            SkipReason::SystemHeader => "inside system header",
            SkipReason::CategoryDisabled => "operator category disabled",
            SkipReason::OverloadedByDefault => "user-overloaded operator",
            SkipReason::DependentDisabled => "dependent expression processing disabled",
            SkipReason::Unclassified => "unclassified expression",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Transform {
        category: Category,
        /// True forces the runtime-dispatch code path.
        dependent: bool,
    },
    Skip(SkipReason),
}

/// Everything the classifier may look at. Borrowed, never mutated.
pub struct ClassifyContext<'a> {
    pub config: &'a TransformationConfig,
    pub types: &'a TypeMap,
    pub parents: &'a ParentMap,
    pub source: &'a SourceFile,
}

impl<'a> ClassifyContext<'a> {
    fn type_of(&self, expr: &Expr) -> Type {
        self.types.get(&expr.id).cloned().unwrap_or(Type::Unknown)
    }
}

pub fn classify(expr: &Expr, ctx: &ClassifyContext) -> Verdict {
    // Suppression rules come before any category match
    match ctx.parents.effective_parent(expr.id) {
        Some(ParentEdge::AddrOf) => return Verdict::Skip(SkipReason::AddressOfContext),
        Some(ParentEdge::SizeQuery) => return Verdict::Skip(SkipReason::SizeQueryContext),
        _ => {}
    }
    if ctx.config.skip_system_headers && ctx.source.is_in_system_header(expr.span.start) {
        return Verdict::Skip(SkipReason::SystemHeader);
    }

    match &expr.kind {
        ExprKind::Subscript { base, .. } => {
            let base_ty = ctx.type_of(base);
            if base_ty.is_named_record() {
                return overloaded_verdict(OverloadedOp::Subscript, ctx);
            }
            if !ctx.config.transform_array_subscripts {
                return Verdict::Skip(SkipReason::CategoryDisabled);
            }
            dependent_verdict(Category::Subscript, base_ty.is_dependent(), ctx)
        }
        ExprKind::Binary { op, lhs, rhs } => {
            let category = match *op {
                op if op.is_arithmetic() => Category::Arithmetic(op),
                op if op.is_assignment() => Category::Assignment(op),
                op if op.is_comparison() => Category::Comparison(op),
                _ => return Verdict::Skip(SkipReason::Unclassified),
            };
            let lhs_ty = ctx.type_of(lhs);
            let rhs_ty = ctx.type_of(rhs);
            if lhs_ty.is_named_record() || rhs_ty.is_named_record() {
                return overloaded_verdict(OverloadedOp::Binary(*op), ctx);
            }
            let enabled = match category {
                Category::Arithmetic(_) => ctx.config.transform_arithmetic_operators,
                Category::Assignment(_) => ctx.config.transform_assignment_operators,
                Category::Comparison(_) => ctx.config.transform_comparison_operators,
                _ => false,
            };
            if !enabled {
                return Verdict::Skip(SkipReason::CategoryDisabled);
            }
            dependent_verdict(category, lhs_ty.is_dependent() || rhs_ty.is_dependent(), ctx)
        }
        // Unary and postfix increment/decrement are recognized as a
        // category but no configuration toggle transforms them
        ExprKind::Unary { .. } | ExprKind::Postfix { .. } => {
            Verdict::Skip(SkipReason::CategoryDisabled)
        }
        _ => Verdict::Skip(SkipReason::Unclassified),
    }
}

fn overloaded_verdict(op: OverloadedOp, ctx: &ClassifyContext) -> Verdict {
    if ctx.config.transform_overloaded_operators {
        // Route through the dispatch wrapper, which forwards to the
        // user's own operator
        Verdict::Transform {
            category: Category::Overloaded(op),
            dependent: true,
        }
    } else {
        Verdict::Skip(SkipReason::OverloadedByDefault)
    }
}

fn dependent_verdict(category: Category, dependent: bool, ctx: &ClassifyContext) -> Verdict {
    if dependent && !ctx.config.instrument_dependent_expressions {
        return Verdict::Skip(SkipReason::DependentDisabled);
    }
    Verdict::Transform {
        category,
        dependent,
    }
}
