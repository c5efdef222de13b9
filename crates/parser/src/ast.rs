// crates/parser/src/ast.rs
//
// Syntax tree for the C-family input language. Every expression node
// carries a NodeId (assigned after parsing) and the exact byte span of its
// source text; the transformation engine keys its type and parent side
// tables off the NodeId and rewrites through the span.

pub type Span = std::ops::Range<usize>;

/// Stable identity of an expression node within one translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Placeholder used by the parser before numbering runs.
    pub const UNASSIGNED: NodeId = NodeId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    LogicalAnd,
    LogicalOr,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem
        )
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::AddAssign
                | BinaryOp::SubAssign
                | BinaryOp::MulAssign
                | BinaryOp::DivAssign
                | BinaryOp::RemAssign
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::LtEq
                | BinaryOp::GtEq
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    PreInc,
    PreDec,
    Plus,
    Minus,
    Not,
    BitNot,
    Deref,
    AddrOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    PostInc,
    PostDec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeQueryKind {
    Sizeof,
    Alignof,
}

/// Argument of sizeof/alignof: either an expression or a type name.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeQueryArg {
    Expr(Expr),
    Type(TypeRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            id: NodeId::UNASSIGNED,
            kind,
            span,
        }
    }

    /// Direct sub-expressions, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::IntLit(_)
            | ExprKind::FloatLit(_)
            | ExprKind::CharLit(_)
            | ExprKind::StrLit(_)
            | ExprKind::BoolLit(_)
            | ExprKind::Ident(_) => Vec::new(),
            ExprKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            ExprKind::Unary { operand, .. } | ExprKind::Postfix { operand, .. } => {
                vec![operand]
            }
            ExprKind::Subscript { base, index } => vec![base, index],
            ExprKind::Call { callee, args } => {
                let mut out: Vec<&Expr> = vec![callee];
                out.extend(args.iter());
                out
            }
            ExprKind::Member { base, .. } => vec![base],
            ExprKind::SizeQuery { arg, .. } => match arg.as_ref() {
                SizeQueryArg::Expr(e) => vec![e],
                SizeQueryArg::Type(_) => Vec::new(),
            },
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => vec![cond, then_expr, else_expr],
            ExprKind::Paren(inner) => vec![inner],
        }
    }

    fn children_mut(&mut self) -> Vec<&mut Expr> {
        match &mut self.kind {
            ExprKind::IntLit(_)
            | ExprKind::FloatLit(_)
            | ExprKind::CharLit(_)
            | ExprKind::StrLit(_)
            | ExprKind::BoolLit(_)
            | ExprKind::Ident(_) => Vec::new(),
            ExprKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            ExprKind::Unary { operand, .. } | ExprKind::Postfix { operand, .. } => {
                vec![operand]
            }
            ExprKind::Subscript { base, index } => vec![base, index],
            ExprKind::Call { callee, args } => {
                let mut out: Vec<&mut Expr> = vec![callee];
                out.extend(args.iter_mut());
                out
            }
            ExprKind::Member { base, .. } => vec![base],
            ExprKind::SizeQuery { arg, .. } => match arg.as_mut() {
                SizeQueryArg::Expr(e) => vec![e],
                SizeQueryArg::Type(_) => Vec::new(),
            },
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => vec![cond, then_expr, else_expr],
            ExprKind::Paren(inner) => vec![inner],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLit(String),
    FloatLit(String),
    CharLit(String),
    StrLit(String),
    BoolLit(bool),

    Ident(String),

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },

    Subscript {
        base: Box<Expr>,
        index: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    Member {
        base: Box<Expr>,
        field: String,
        arrow: bool,
    },

    SizeQuery {
        kind: SizeQueryKind,
        arg: Box<SizeQueryArg>,
    },

    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    Paren(Box<Expr>),
}

// ---------------------------------------------------------------------------
// Type syntax (what the source spells; the resolver turns this into a
// semantic types::Type)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum BaseTypeSyntax {
    Void,
    Bool,
    Char,
    Short,
    Int,
    Long,
    LongLong,
    Float,
    Double,
    SizeT,
    Named(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSyntax {
    pub is_const: bool,
    pub unsigned: bool,
    pub base: BaseTypeSyntax,
}

/// A type spelling plus pointer depth, as used for return and parameter
/// types and sizeof(type) arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub syntax: TypeSyntax,
    pub pointer_depth: usize,
}

// ---------------------------------------------------------------------------
// Statements and items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub pointer_depth: usize,
    pub name: String,
    /// One entry per `[dim]`; None for an empty `[]`.
    pub array_dims: Vec<Option<Expr>>,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub ty: TypeSyntax,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Decl(DeclStmt),

    Expr(Expr),

    Return(Option<Expr>),

    Block(Vec<Stmt>),

    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        cond: Expr,
        body: Box<Stmt>,
    },

    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },

    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: TypeRef,
    pub name: Option<String>,
    pub array_dims: Vec<Option<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub ret: TypeRef,
    pub name: String,
    pub params: Vec<Param>,
    /// None for a declaration without a body.
    pub body: Option<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Function(FunctionDef),

    Template {
        params: Vec<String>,
        func: FunctionDef,
    },

    Global(DeclStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    pub items: Vec<Item>,
}

// ---------------------------------------------------------------------------
// Walkers
// ---------------------------------------------------------------------------

/// Root expressions of one statement: the expressions a statement evaluates
/// directly. Array-bound expressions inside declarators are NOT roots —
/// they must stay constant expressions, so the transformation pass never
/// touches them — but initializers are.
pub fn stmt_root_exprs(stmt: &Stmt) -> Vec<&Expr> {
    match &stmt.kind {
        StmtKind::Decl(decl) => decl
            .declarators
            .iter()
            .filter_map(|d| d.init.as_ref())
            .collect(),
        StmtKind::Expr(e) => vec![e],
        StmtKind::Return(e) => e.iter().collect(),
        StmtKind::Block(_)
        | StmtKind::If { .. }
        | StmtKind::While { .. }
        | StmtKind::For { .. }
        | StmtKind::Empty => Vec::new(),
    }
}

fn walk_stmt<'a>(stmt: &'a Stmt, roots: &mut Vec<&'a Expr>) {
    roots.extend(stmt_root_exprs(stmt));
    match &stmt.kind {
        StmtKind::Block(stmts) => {
            for s in stmts {
                walk_stmt(s, roots);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            roots.push(cond);
            walk_stmt(then_branch, roots);
            if let Some(e) = else_branch {
                walk_stmt(e, roots);
            }
        }
        StmtKind::While { cond, body } => {
            roots.push(cond);
            walk_stmt(body, roots);
        }
        StmtKind::For {
            init,
            cond,
            step,
            body,
        } => {
            if let Some(init) = init {
                walk_stmt(init, roots);
            }
            roots.extend(cond.iter());
            roots.extend(step.iter());
            walk_stmt(body, roots);
        }
        _ => {}
    }
}

impl TranslationUnit {
    /// Every root expression of the unit, in source order. Sub-expressions
    /// are reached through `Expr::children`.
    pub fn root_exprs(&self) -> Vec<&Expr> {
        let mut roots = Vec::new();
        for item in &self.items {
            match &item.kind {
                ItemKind::Function(func) | ItemKind::Template { func, .. } => {
                    if let Some(body) = &func.body {
                        walk_stmt(body, &mut roots);
                    }
                }
                ItemKind::Global(decl) => {
                    roots.extend(decl.declarators.iter().filter_map(|d| d.init.as_ref()));
                }
            }
        }
        roots
    }
}

fn number_expr(expr: &mut Expr, next: &mut u32) {
    expr.id = NodeId(*next);
    *next += 1;
    for child in expr.children_mut() {
        number_expr(child, next);
    }
}

fn number_declarators(decl: &mut DeclStmt, next: &mut u32) {
    for d in &mut decl.declarators {
        for dim in d.array_dims.iter_mut().flatten() {
            number_expr(dim, next);
        }
        if let Some(init) = &mut d.init {
            number_expr(init, next);
        }
    }
}

fn number_stmt(stmt: &mut Stmt, next: &mut u32) {
    match &mut stmt.kind {
        StmtKind::Decl(decl) => number_declarators(decl, next),
        StmtKind::Expr(e) => number_expr(e, next),
        StmtKind::Return(e) => {
            if let Some(e) = e {
                number_expr(e, next);
            }
        }
        StmtKind::Block(stmts) => {
            for s in stmts {
                number_stmt(s, next);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            number_expr(cond, next);
            number_stmt(then_branch, next);
            if let Some(e) = else_branch {
                number_stmt(e, next);
            }
        }
        StmtKind::While { cond, body } => {
            number_expr(cond, next);
            number_stmt(body, next);
        }
        StmtKind::For {
            init,
            cond,
            step,
            body,
        } => {
            if let Some(init) = init {
                number_stmt(init, next);
            }
            if let Some(cond) = cond {
                number_expr(cond, next);
            }
            if let Some(step) = step {
                number_expr(step, next);
            }
            number_stmt(body, next);
        }
        StmtKind::Empty => {}
    }
}

/// Assign a unique NodeId to every expression node. Ids start at 1;
/// NodeId(0) stays reserved as the unassigned placeholder.
pub fn assign_ids(tu: &mut TranslationUnit) {
    let mut next = 1u32;
    for item in &mut tu.items {
        match &mut item.kind {
            ItemKind::Function(func) | ItemKind::Template { func, .. } => {
                for param in &mut func.params {
                    for dim in param.array_dims.iter_mut().flatten() {
                        number_expr(dim, &mut next);
                    }
                }
                if let Some(body) = &mut func.body {
                    number_stmt(body, &mut next);
                }
            }
            ItemKind::Global(decl) => number_declarators(decl, &mut next),
        }
    }
}
