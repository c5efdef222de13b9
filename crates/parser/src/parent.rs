// Parent map over expression nodes.
//
// The classifier's suppression rules need one question answered: in what
// position does an expression sit inside its immediate parent? The map is
// built once per translation unit after node numbering.

use crate::ast::{Expr, ExprKind, NodeId, SizeQueryArg, TranslationUnit};
use std::collections::HashMap;

/// How a child expression relates to its parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentEdge {
    /// Operand of unary `&`: its address, not its value, is observed.
    AddrOf,
    /// Argument of sizeof/alignof: never evaluated.
    SizeQuery,
    /// Inner expression of a parenthesized group.
    Paren,
    /// Any other expression position.
    Other,
}

#[derive(Debug, Default)]
pub struct ParentMap {
    edges: HashMap<NodeId, (NodeId, ParentEdge)>,
}

impl ParentMap {
    pub fn build(tu: &TranslationUnit) -> Self {
        let mut map = ParentMap::default();
        for root in tu.root_exprs() {
            map.record(root);
        }
        map
    }

    fn record(&mut self, expr: &Expr) {
        let edge_for_child = |child: &Expr| -> ParentEdge {
            match &expr.kind {
                ExprKind::Unary {
                    op: crate::ast::UnaryOp::AddrOf,
                    ..
                } => ParentEdge::AddrOf,
                ExprKind::SizeQuery { arg, .. } => match arg.as_ref() {
                    SizeQueryArg::Expr(e) if e.id == child.id => ParentEdge::SizeQuery,
                    _ => ParentEdge::Other,
                },
                ExprKind::Paren(_) => ParentEdge::Paren,
                _ => ParentEdge::Other,
            }
        };
        for child in expr.children() {
            self.edges.insert(child.id, (expr.id, edge_for_child(child)));
            self.record(child);
        }
    }

    /// Immediate parent of a node, if it has one.
    pub fn parent_of(&self, id: NodeId) -> Option<(NodeId, ParentEdge)> {
        self.edges.get(&id).copied()
    }

    /// The nearest enclosing non-parenthesis edge. `&(arr[i])` reports the
    /// subscript as an address-of operand just like `&arr[i]` does.
    pub fn effective_parent(&self, id: NodeId) -> Option<ParentEdge> {
        let mut current = id;
        loop {
            match self.edges.get(&current) {
                None => return None,
                Some((parent, ParentEdge::Paren)) => current = *parent,
                Some((_, edge)) => return Some(*edge),
            }
        }
    }
}
