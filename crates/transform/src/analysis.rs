// Operator detection pass
//
// Read-only sweep over a translation unit counting operator occurrences.
// Feeds the dry-run and verbose reports; never touches the rewrite
// buffer.

use parser::ast::{Expr, ExprKind, TranslationUnit};
use parser::source::SourceFile;
use parser::types::{Type, TypeMap};
use std::fmt;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DetectionStats {
    pub array_subscript_count: usize,
    pub native_array_count: usize,
    pub pointer_access_count: usize,
    pub arithmetic_operator_count: usize,
    pub assignment_operator_count: usize,
    pub comparison_operator_count: usize,
    pub unary_operator_count: usize,
    pub overloaded_operator_count: usize,
    pub template_dependent_count: usize,
    pub system_header_count: usize,
}

impl DetectionStats {
    pub fn reset(&mut self) {
        *self = DetectionStats::default();
    }
}

impl fmt::Display for DetectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Operator Detection Statistics:")?;
        writeln!(f, "  Array subscripts: {}", self.array_subscript_count)?;
        writeln!(f, "    Native arrays: {}", self.native_array_count)?;
        writeln!(f, "    Pointer access: {}", self.pointer_access_count)?;
        writeln!(
            f,
            "  Arithmetic operators: {}",
            self.arithmetic_operator_count
        )?;
        writeln!(
            f,
            "  Assignment operators: {}",
            self.assignment_operator_count
        )?;
        writeln!(
            f,
            "  Comparison operators: {}",
            self.comparison_operator_count
        )?;
        writeln!(f, "  Unary operators: {}", self.unary_operator_count)?;
        writeln!(
            f,
            "  Overloaded operators: {}",
            self.overloaded_operator_count
        )?;
        writeln!(
            f,
            "  Template dependent: {}",
            self.template_dependent_count
        )?;
        write!(
            f,
            "  System header expressions: {}",
            self.system_header_count
        )
    }
}

/// Count operator expressions without transforming anything.
pub struct OperatorScan<'a> {
    types: &'a TypeMap,
    source: &'a SourceFile,
    stats: DetectionStats,
}

impl<'a> OperatorScan<'a> {
    pub fn analyze(
        tu: &TranslationUnit,
        types: &'a TypeMap,
        source: &'a SourceFile,
    ) -> DetectionStats {
        let mut scan = OperatorScan {
            types,
            source,
            stats: DetectionStats::default(),
        };
        for root in tu.root_exprs() {
            scan.visit(root);
        }
        scan.stats
    }

    fn visit(&mut self, expr: &Expr) {
        for child in expr.children() {
            self.visit(child);
        }

        if self.source.is_in_system_header(expr.span.start) {
            // Counted separately, not analyzed further
            if self.is_operator(expr) {
                self.stats.system_header_count += 1;
            }
            return;
        }

        match &expr.kind {
            ExprKind::Subscript { base, .. } => {
                self.stats.array_subscript_count += 1;
                match self.type_of(base) {
                    Type::Array(_, _) => self.stats.native_array_count += 1,
                    Type::Pointer(_) => self.stats.pointer_access_count += 1,
                    ty if ty.is_named_record() => self.stats.overloaded_operator_count += 1,
                    _ => {}
                }
                if self.is_dependent(expr) {
                    self.stats.template_dependent_count += 1;
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                if self.type_of(lhs).is_named_record() || self.type_of(rhs).is_named_record() {
                    self.stats.overloaded_operator_count += 1;
                } else if op.is_arithmetic() {
                    self.stats.arithmetic_operator_count += 1;
                } else if op.is_assignment() {
                    self.stats.assignment_operator_count += 1;
                } else if op.is_comparison() {
                    self.stats.comparison_operator_count += 1;
                }
                if self.is_dependent(expr) {
                    self.stats.template_dependent_count += 1;
                }
            }
            ExprKind::Unary { .. } | ExprKind::Postfix { .. } => {
                self.stats.unary_operator_count += 1;
                if self.is_dependent(expr) {
                    self.stats.template_dependent_count += 1;
                }
            }
            _ => {}
        }
    }

    fn is_operator(&self, expr: &Expr) -> bool {
        matches!(
            expr.kind,
            ExprKind::Subscript { .. }
                | ExprKind::Binary { .. }
                | ExprKind::Unary { .. }
                | ExprKind::Postfix { .. }
        )
    }

    fn type_of(&self, expr: &Expr) -> Type {
        self.types.get(&expr.id).cloned().unwrap_or(Type::Unknown)
    }

    /// Dependent if any direct operand (or the node itself) has a
    /// dependent static type.
    fn is_dependent(&self, expr: &Expr) -> bool {
        if self.type_of(expr).is_dependent() {
            return true;
        }
        expr.children()
            .into_iter()
            .any(|c| self.type_of(c).is_dependent())
    }
}
