// Semantic types and the scope-based type resolver.
//
// The transformation engine only needs local type facts: what static type
// an operand has, whether that type is fully resolved or depends on an
// enclosing template, and how it spells in C++ when spliced into generated
// wrapper code. The resolver computes those facts in one pass and stores
// them in a NodeId-keyed side table; it is not a type checker and never
// rejects a program.

use crate::ast::{
    BaseTypeSyntax, BinaryOp, DeclStmt, Declarator, Expr, ExprKind, FunctionDef, ItemKind, NodeId,
    Param, SizeQueryArg, Stmt, StmtKind, TranslationUnit, TypeRef, TypeSyntax, UnaryOp,
};
use std::collections::{HashMap, HashSet};

/// Static type of an expression, as far as local inspection can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A builtin scalar, carrying its canonical C spelling.
    Builtin(&'static str),
    /// A named record (class/struct) type.
    Named(String),
    /// A template parameter: dependent until instantiation.
    Param(String),
    Pointer(Box<Type>),
    Array(Box<Type>, Option<u64>),
    /// Not deducible from local inspection; treated as dependent.
    Unknown,
}

impl Type {
    pub fn is_dependent(&self) -> bool {
        match self {
            Type::Param(_) | Type::Unknown => true,
            Type::Pointer(inner) => inner.is_dependent(),
            Type::Array(inner, _) => inner.is_dependent(),
            Type::Builtin(_) | Type::Named(_) => false,
        }
    }

    pub fn is_named_record(&self) -> bool {
        matches!(self, Type::Named(_))
    }

    /// C++ spelling of the type, for splicing into generated code.
    pub fn render(&self) -> String {
        match self {
            Type::Builtin(s) => (*s).to_string(),
            Type::Named(n) | Type::Param(n) => n.clone(),
            Type::Pointer(inner) => {
                let base = inner.render();
                if base.ends_with('*') {
                    format!("{}*", base)
                } else {
                    format!("{} *", base)
                }
            }
            Type::Array(inner, Some(n)) => format!("{}[{}]", inner.render(), n),
            Type::Array(inner, None) => format!("{}[]", inner.render()),
            Type::Unknown => "auto".to_string(),
        }
    }

    /// Element type yielded by subscripting a value of this type.
    pub fn element_type(&self) -> Type {
        match self {
            Type::Pointer(inner) | Type::Array(inner, _) => (**inner).clone(),
            _ => Type::Unknown,
        }
    }
}

pub type TypeMap = HashMap<NodeId, Type>;

fn builtin_spelling(unsigned: bool, base: &BaseTypeSyntax) -> &'static str {
    if unsigned {
        match base {
            BaseTypeSyntax::Char => "unsigned char",
            BaseTypeSyntax::Short => "unsigned short",
            BaseTypeSyntax::Long => "unsigned long",
            BaseTypeSyntax::LongLong => "unsigned long long",
            _ => "unsigned int",
        }
    } else {
        match base {
            BaseTypeSyntax::Void => "void",
            BaseTypeSyntax::Bool => "bool",
            BaseTypeSyntax::Char => "char",
            BaseTypeSyntax::Short => "short",
            BaseTypeSyntax::Int => "int",
            BaseTypeSyntax::Long => "long",
            BaseTypeSyntax::LongLong => "long long",
            BaseTypeSyntax::Float => "float",
            BaseTypeSyntax::Double => "double",
            BaseTypeSyntax::SizeT => "size_t",
            BaseTypeSyntax::Named(_) => unreachable!("named types handled by caller"),
        }
    }
}

/// One pass over a translation unit producing the NodeId -> Type table.
pub struct TypeResolver {
    map: TypeMap,
    scopes: Vec<HashMap<String, Type>>,
    functions: HashMap<String, Type>,
    template_params: HashSet<String>,
}

impl TypeResolver {
    pub fn resolve(tu: &TranslationUnit) -> TypeMap {
        let mut resolver = TypeResolver {
            map: TypeMap::new(),
            scopes: vec![HashMap::new()],
            functions: HashMap::new(),
            template_params: HashSet::new(),
        };
        resolver.collect_signatures(tu);
        resolver.run(tu);
        resolver.map
    }

    fn collect_signatures(&mut self, tu: &TranslationUnit) {
        for item in &tu.items {
            match &item.kind {
                ItemKind::Function(func) => {
                    let ret = self.type_from_ref(&func.ret);
                    self.functions.insert(func.name.clone(), ret);
                }
                ItemKind::Template { params, func } => {
                    // Return types naming a template parameter are dependent
                    self.template_params = params.iter().cloned().collect();
                    let ret = self.type_from_ref(&func.ret);
                    self.template_params.clear();
                    self.functions.insert(func.name.clone(), ret);
                }
                ItemKind::Global(_) => {}
            }
        }
    }

    fn run(&mut self, tu: &TranslationUnit) {
        for item in &tu.items {
            match &item.kind {
                ItemKind::Function(func) => {
                    self.template_params.clear();
                    self.resolve_function(func);
                }
                ItemKind::Template { params, func } => {
                    self.template_params = params.iter().cloned().collect();
                    self.resolve_function(func);
                    self.template_params.clear();
                }
                ItemKind::Global(decl) => self.resolve_decl(decl),
            }
        }
    }

    fn resolve_function(&mut self, func: &FunctionDef) {
        self.scopes.push(HashMap::new());
        for param in &func.params {
            self.declare_param(param);
        }
        if let Some(body) = &func.body {
            self.resolve_stmt(body);
        }
        self.scopes.pop();
    }

    fn declare_param(&mut self, param: &Param) {
        let Some(name) = &param.name else {
            return;
        };
        let mut ty = self.type_from_ref(&param.ty);
        // Array parameters decay to pointers
        if !param.array_dims.is_empty() {
            for dim in param.array_dims.iter().flatten() {
                self.annotate(dim);
            }
            ty = Type::Pointer(Box::new(ty));
        }
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name.clone(), ty);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Decl(decl) => self.resolve_decl(decl),
            StmtKind::Expr(e) => {
                self.annotate(e);
            }
            StmtKind::Return(e) => {
                if let Some(e) = e {
                    self.annotate(e);
                }
            }
            StmtKind::Block(stmts) => {
                self.scopes.push(HashMap::new());
                for s in stmts {
                    self.resolve_stmt(s);
                }
                self.scopes.pop();
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.annotate(cond);
                self.resolve_stmt(then_branch);
                if let Some(e) = else_branch {
                    self.resolve_stmt(e);
                }
            }
            StmtKind::While { cond, body } => {
                self.annotate(cond);
                self.resolve_stmt(body);
            }
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                self.scopes.push(HashMap::new());
                if let Some(init) = init {
                    self.resolve_stmt(init);
                }
                if let Some(cond) = cond {
                    self.annotate(cond);
                }
                if let Some(step) = step {
                    self.annotate(step);
                }
                self.resolve_stmt(body);
                self.scopes.pop();
            }
            StmtKind::Empty => {}
        }
    }

    fn resolve_decl(&mut self, decl: &DeclStmt) {
        for d in &decl.declarators {
            let ty = self.declarator_type(&decl.ty, d);
            for dim in d.array_dims.iter().flatten() {
                self.annotate(dim);
            }
            if let Some(init) = &d.init {
                self.annotate(init);
            }
            self.scopes
                .last_mut()
                .expect("scope stack is never empty")
                .insert(d.name.clone(), ty);
        }
    }

    fn declarator_type(&self, spec: &TypeSyntax, d: &Declarator) -> Type {
        let mut ty = self.type_from_syntax(spec);
        for _ in 0..d.pointer_depth {
            ty = Type::Pointer(Box::new(ty));
        }
        // int arr[2][3] is an array of 2 arrays of 3
        for dim in d.array_dims.iter().rev() {
            ty = Type::Array(Box::new(ty), dim.as_ref().and_then(const_dim_value));
        }
        ty
    }

    fn type_from_syntax(&self, spec: &TypeSyntax) -> Type {
        match &spec.base {
            BaseTypeSyntax::Named(n) if self.template_params.contains(n) => {
                Type::Param(n.clone())
            }
            BaseTypeSyntax::Named(n) => Type::Named(n.clone()),
            base => Type::Builtin(builtin_spelling(spec.unsigned, base)),
        }
    }

    fn type_from_ref(&self, ty: &TypeRef) -> Type {
        let mut out = self.type_from_syntax(&ty.syntax);
        for _ in 0..ty.pointer_depth {
            out = Type::Pointer(Box::new(out));
        }
        out
    }

    fn lookup(&self, name: &str) -> Type {
        for scope in self.scopes.iter().rev() {
            if let Some(ty) = scope.get(name) {
                return ty.clone();
            }
        }
        Type::Unknown
    }

    /// Compute and record the type of an expression tree.
    fn annotate(&mut self, expr: &Expr) -> Type {
        let ty = match &expr.kind {
            ExprKind::IntLit(s) => {
                if s.contains('u') || s.contains('U') {
                    Type::Builtin("unsigned int")
                } else {
                    Type::Builtin("int")
                }
            }
            ExprKind::FloatLit(s) => {
                if s.ends_with('f') || s.ends_with('F') {
                    Type::Builtin("float")
                } else {
                    Type::Builtin("double")
                }
            }
            ExprKind::CharLit(_) => Type::Builtin("char"),
            ExprKind::StrLit(_) => Type::Pointer(Box::new(Type::Builtin("char"))),
            ExprKind::BoolLit(_) => Type::Builtin("bool"),
            ExprKind::Ident(name) => self.lookup(name),
            ExprKind::Binary { op, lhs, rhs } => {
                let lt = self.annotate(lhs);
                let rt = self.annotate(rhs);
                binary_result(*op, &lt, &rt)
            }
            ExprKind::Unary { op, operand } => {
                let inner = self.annotate(operand);
                match op {
                    UnaryOp::Not => Type::Builtin("bool"),
                    UnaryOp::Deref => inner.element_type(),
                    UnaryOp::AddrOf => Type::Pointer(Box::new(inner)),
                    _ => inner,
                }
            }
            ExprKind::Postfix { operand, .. } => self.annotate(operand),
            ExprKind::Subscript { base, index } => {
                let base_ty = self.annotate(base);
                self.annotate(index);
                if base_ty.is_dependent() {
                    Type::Unknown
                } else {
                    base_ty.element_type()
                }
            }
            ExprKind::Call { callee, args } => {
                for arg in args {
                    self.annotate(arg);
                }
                match &callee.kind {
                    ExprKind::Ident(name) => {
                        // Record the callee itself as unknown; calls resolve
                        // through the signature table
                        self.map.insert(callee.id, Type::Unknown);
                        self.functions.get(name).cloned().unwrap_or(Type::Unknown)
                    }
                    _ => {
                        self.annotate(callee);
                        Type::Unknown
                    }
                }
            }
            ExprKind::Member { base, .. } => {
                self.annotate(base);
                Type::Unknown
            }
            ExprKind::SizeQuery { arg, .. } => {
                if let SizeQueryArg::Expr(e) = arg.as_ref() {
                    self.annotate(e);
                }
                Type::Builtin("size_t")
            }
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                self.annotate(cond);
                let ty = self.annotate(then_expr);
                self.annotate(else_expr);
                ty
            }
            ExprKind::Paren(inner) => self.annotate(inner),
        };
        self.map.insert(expr.id, ty.clone());
        ty
    }
}

fn const_dim_value(expr: &Expr) -> Option<u64> {
    match &expr.kind {
        ExprKind::IntLit(s) => {
            let digits: String = s.chars().take_while(|c| c.is_ascii_alphanumeric()).collect();
            let trimmed = digits.trim_end_matches(|c: char| "uUlL".contains(c));
            if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
                u64::from_str_radix(hex, 16).ok()
            } else {
                trimmed.parse().ok()
            }
        }
        ExprKind::Paren(inner) => const_dim_value(inner),
        _ => None,
    }
}

fn integer_rank(spelling: &str) -> Option<u8> {
    match spelling {
        "bool" => Some(0),
        "char" | "unsigned char" => Some(1),
        "short" | "unsigned short" => Some(2),
        "int" => Some(3),
        "unsigned int" => Some(4),
        "long" => Some(5),
        "unsigned long" | "size_t" => Some(6),
        "long long" => Some(7),
        "unsigned long long" => Some(8),
        _ => None,
    }
}

/// Simplified usual-arithmetic-conversion result for binary expressions.
fn arithmetic_result(lhs: &Type, rhs: &Type) -> Type {
    if lhs.is_dependent() || rhs.is_dependent() {
        return Type::Unknown;
    }
    // Pointer arithmetic keeps the pointer side (arrays decay)
    match (lhs, rhs) {
        (Type::Pointer(_), _) | (Type::Array(_, _), _) => {
            return match lhs {
                Type::Array(inner, _) => Type::Pointer(inner.clone()),
                other => other.clone(),
            };
        }
        (_, Type::Pointer(_)) | (_, Type::Array(_, _)) => {
            return match rhs {
                Type::Array(inner, _) => Type::Pointer(inner.clone()),
                other => other.clone(),
            };
        }
        _ => {}
    }
    let (Type::Builtin(l), Type::Builtin(r)) = (lhs, rhs) else {
        // A named record operand means an overloaded operator; its result
        // type is not locally knowable
        return Type::Unknown;
    };
    for float in ["double", "float"] {
        if *l == float || *r == float {
            return Type::Builtin(if *l == "double" || *r == "double" {
                "double"
            } else {
                "float"
            });
        }
    }
    match (integer_rank(l), integer_rank(r)) {
        (Some(a), Some(b)) => {
            let winner: &'static str = if a >= b { l } else { r };
            if a.max(b) <= 2 {
                // Integer promotion: everything below int computes as int
                Type::Builtin("int")
            } else {
                Type::Builtin(winner)
            }
        }
        _ => Type::Unknown,
    }
}

fn binary_result(op: BinaryOp, lhs: &Type, rhs: &Type) -> Type {
    if op.is_assignment() {
        return lhs.clone();
    }
    if op.is_comparison() || matches!(op, BinaryOp::LogicalAnd | BinaryOp::LogicalOr) {
        if lhs.is_dependent() || rhs.is_dependent() {
            return Type::Unknown;
        }
        return Type::Builtin("bool");
    }
    arithmetic_result(lhs, rhs)
}
