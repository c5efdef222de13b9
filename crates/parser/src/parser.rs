use crate::ast::{
    BaseTypeSyntax, BinaryOp, DeclStmt, Declarator, Expr, ExprKind, FunctionDef, Item, ItemKind,
    Param, PostfixOp, SizeQueryArg, SizeQueryKind, Stmt, StmtKind, TranslationUnit, TypeRef,
    TypeSyntax, UnaryOp,
};
use chumsky::prelude::*;
use lexer::token::Token;

pub fn parser() -> impl Parser<Token, TranslationUnit, Error = Simple<Token>> {
    item_parser()
        .repeated()
        .map(|items| TranslationUnit { items })
        .then_ignore(end())
}

fn base_type_parser() -> impl Parser<Token, BaseTypeSyntax, Error = Simple<Token>> + Clone {
    choice((
        just(Token::Void).to(BaseTypeSyntax::Void),
        just(Token::Bool).to(BaseTypeSyntax::Bool),
        just(Token::Char).to(BaseTypeSyntax::Char),
        just(Token::Short).to(BaseTypeSyntax::Short),
        just(Token::Int).to(BaseTypeSyntax::Int),
        just(Token::Long)
            .then(just(Token::Long).or_not())
            .map(|(_, second)| {
                if second.is_some() {
                    BaseTypeSyntax::LongLong
                } else {
                    BaseTypeSyntax::Long
                }
            }),
        just(Token::Float).to(BaseTypeSyntax::Float),
        just(Token::Double).to(BaseTypeSyntax::Double),
        just(Token::SizeT).to(BaseTypeSyntax::SizeT),
    ))
}

fn type_spec_parser() -> impl Parser<Token, TypeSyntax, Error = Simple<Token>> + Clone {
    let base = base_type_parser();

    just(Token::Const)
        .or_not()
        .map(|c| c.is_some())
        .then(choice((
            // "unsigned" alone means unsigned int
            just(Token::Unsigned)
                .ignore_then(base.clone().or_not())
                .map(|b| (true, b.unwrap_or(BaseTypeSyntax::Int))),
            just(Token::Signed)
                .ignore_then(base.clone())
                .map(|b| (false, b)),
            base.map(|b| (false, b)),
            select! { Token::Identifier(n) => BaseTypeSyntax::Named(n) }.map(|b| (false, b)),
        )))
        .map(|(is_const, (unsigned, base))| TypeSyntax {
            is_const,
            unsigned,
            base,
        })
}

fn type_ref_parser() -> impl Parser<Token, TypeRef, Error = Simple<Token>> + Clone {
    type_spec_parser()
        .then(just(Token::Star).repeated())
        .map(|(syntax, stars)| TypeRef {
            syntax,
            pointer_depth: stars.len(),
        })
}

pub fn expr_parser() -> impl Parser<Token, Expr, Error = Simple<Token>> + Clone {
    recursive(|expr| {
        let ident = select! { Token::Identifier(name) => name };

        let literal = select! {
            Token::IntLit(s) => ExprKind::IntLit(s),
            Token::FloatLit(s) => ExprKind::FloatLit(s),
            Token::CharLit(s) => ExprKind::CharLit(s),
            Token::StrLit(s) => ExprKind::StrLit(s),
            Token::True => ExprKind::BoolLit(true),
            Token::False => ExprKind::BoolLit(false),
        }
        .map_with_span(Expr::new);

        let ident_expr = ident.map(ExprKind::Ident).map_with_span(Expr::new);

        let paren = expr
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(|inner| ExprKind::Paren(Box::new(inner)))
            .map_with_span(Expr::new);

        let primary = literal.or(ident_expr).or(paren);

        // Postfix tier: subscript, call, member access, postfix ++/--
        #[derive(Clone)]
        enum PostOp {
            Index(Expr),
            Call(Vec<Expr>),
            Member(String, bool),
            Inc,
            Dec,
        }

        let post_op = choice((
            expr.clone()
                .delimited_by(just(Token::LBracket), just(Token::RBracket))
                .map(PostOp::Index),
            expr.clone()
                .separated_by(just(Token::Comma))
                .allow_trailing()
                .delimited_by(just(Token::LParen), just(Token::RParen))
                .map(PostOp::Call),
            just(Token::Dot)
                .ignore_then(ident)
                .map(|f| PostOp::Member(f, false)),
            just(Token::Arrow)
                .ignore_then(ident)
                .map(|f| PostOp::Member(f, true)),
            just(Token::PlusPlus).to(PostOp::Inc),
            just(Token::MinusMinus).to(PostOp::Dec),
        ))
        .map_with_span(|op, span: std::ops::Range<usize>| (op, span));

        let postfix = primary
            .then(post_op.repeated())
            .foldl(|base, (op, op_span)| {
                let span = base.span.start..op_span.end;
                let kind = match op {
                    PostOp::Index(index) => ExprKind::Subscript {
                        base: Box::new(base),
                        index: Box::new(index),
                    },
                    PostOp::Call(args) => ExprKind::Call {
                        callee: Box::new(base),
                        args,
                    },
                    PostOp::Member(field, arrow) => ExprKind::Member {
                        base: Box::new(base),
                        field,
                        arrow,
                    },
                    PostOp::Inc => ExprKind::Postfix {
                        op: PostfixOp::PostInc,
                        operand: Box::new(base),
                    },
                    PostOp::Dec => ExprKind::Postfix {
                        op: PostfixOp::PostDec,
                        operand: Box::new(base),
                    },
                };
                Expr::new(kind, span)
            })
            .boxed();

        // Unary tier, including sizeof/alignof with either a parenthesized
        // type or an expression argument (type tried first, as in C)
        let unary = recursive(|unary| {
            let size_kind = just(Token::Sizeof)
                .to(SizeQueryKind::Sizeof)
                .or(just(Token::Alignof).to(SizeQueryKind::Alignof));

            let size_query = size_kind
                .then(
                    type_ref_parser()
                        .delimited_by(just(Token::LParen), just(Token::RParen))
                        .map(SizeQueryArg::Type)
                        .or(unary.clone().map(SizeQueryArg::Expr)),
                )
                .map_with_span(|(kind, arg), span| {
                    Expr::new(
                        ExprKind::SizeQuery {
                            kind,
                            arg: Box::new(arg),
                        },
                        span,
                    )
                });

            let prefix_op = choice((
                just(Token::PlusPlus).to(UnaryOp::PreInc),
                just(Token::MinusMinus).to(UnaryOp::PreDec),
                just(Token::Plus).to(UnaryOp::Plus),
                just(Token::Minus).to(UnaryOp::Minus),
                just(Token::Not).to(UnaryOp::Not),
                just(Token::Tilde).to(UnaryOp::BitNot),
                just(Token::Star).to(UnaryOp::Deref),
                just(Token::Ampersand).to(UnaryOp::AddrOf),
            ))
            .map_with_span(|op, span: std::ops::Range<usize>| (op, span));

            prefix_op
                .repeated()
                .then(size_query.or(postfix.clone()))
                .foldr(|(op, op_span), operand| {
                    let span = op_span.start..operand.span.end;
                    Expr::new(
                        ExprKind::Unary {
                            op,
                            operand: Box::new(operand),
                        },
                        span,
                    )
                })
        })
        .boxed();

        // Binary tiers follow C precedence, each left-folding into Binary
        fn binary_fold(lhs: Expr, op: BinaryOp, rhs: Expr) -> Expr {
            let span = lhs.span.start..rhs.span.end;
            Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            )
        }

        let product = unary
            .clone()
            .then(
                choice((
                    just(Token::Star).to(BinaryOp::Mul),
                    just(Token::Slash).to(BinaryOp::Div),
                    just(Token::Percent).to(BinaryOp::Rem),
                ))
                .then(unary)
                .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let sum = product
            .clone()
            .then(
                choice((
                    just(Token::Plus).to(BinaryOp::Add),
                    just(Token::Minus).to(BinaryOp::Sub),
                ))
                .then(product)
                .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let shift = sum
            .clone()
            .then(
                choice((
                    just(Token::Shl).to(BinaryOp::Shl),
                    just(Token::Shr).to(BinaryOp::Shr),
                ))
                .then(sum)
                .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let relational = shift
            .clone()
            .then(
                choice((
                    just(Token::LtEq).to(BinaryOp::LtEq),
                    just(Token::GtEq).to(BinaryOp::GtEq),
                    just(Token::Lt).to(BinaryOp::Lt),
                    just(Token::Gt).to(BinaryOp::Gt),
                ))
                .then(shift)
                .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let equality = relational
            .clone()
            .then(
                choice((
                    just(Token::DoubleEq).to(BinaryOp::Eq),
                    just(Token::NotEq).to(BinaryOp::NotEq),
                ))
                .then(relational)
                .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let bit_and = equality
            .clone()
            .then(
                just(Token::Ampersand)
                    .to(BinaryOp::BitAnd)
                    .then(equality)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let bit_xor = bit_and
            .clone()
            .then(
                just(Token::Caret)
                    .to(BinaryOp::BitXor)
                    .then(bit_and)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let bit_or = bit_xor
            .clone()
            .then(
                just(Token::Pipe)
                    .to(BinaryOp::BitOr)
                    .then(bit_xor)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let logic_and = bit_or
            .clone()
            .then(
                just(Token::AndAnd)
                    .to(BinaryOp::LogicalAnd)
                    .then(bit_or)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let logic_or = logic_and
            .clone()
            .then(
                just(Token::OrOr)
                    .to(BinaryOp::LogicalOr)
                    .then(logic_and)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary_fold(lhs, op, rhs))
            .boxed();

        let ternary = logic_or
            .clone()
            .then(
                just(Token::Question)
                    .ignore_then(expr.clone())
                    .then_ignore(just(Token::Colon))
                    .then(expr.clone())
                    .or_not(),
            )
            .map(|(cond, branches)| match branches {
                None => cond,
                Some((then_expr, else_expr)) => {
                    let span = cond.span.start..else_expr.span.end;
                    Expr::new(
                        ExprKind::Ternary {
                            cond: Box::new(cond),
                            then_expr: Box::new(then_expr),
                            else_expr: Box::new(else_expr),
                        },
                        span,
                    )
                }
            });

        // Assignment is right-associative: recurse through the outer expr
        let assign_op = choice((
            just(Token::Eq).to(BinaryOp::Assign),
            just(Token::PlusEq).to(BinaryOp::AddAssign),
            just(Token::MinusEq).to(BinaryOp::SubAssign),
            just(Token::StarEq).to(BinaryOp::MulAssign),
            just(Token::SlashEq).to(BinaryOp::DivAssign),
            just(Token::PercentEq).to(BinaryOp::RemAssign),
        ));

        ternary
            .then(assign_op.then(expr.clone()).or_not())
            .map(|(lhs, rest)| match rest {
                None => lhs,
                Some((op, rhs)) => binary_fold(lhs, op, rhs),
            })
            .boxed()
    })
}

pub fn stmt_parser() -> impl Parser<Token, Stmt, Error = Simple<Token>> + Clone {
    recursive(|stmt| {
        let expr = expr_parser();
        let ident = select! { Token::Identifier(name) => name };

        let dim = expr
            .clone()
            .or_not()
            .delimited_by(just(Token::LBracket), just(Token::RBracket));

        let declarator = just(Token::Star)
            .repeated()
            .then(ident)
            .then(dim.repeated())
            .then(just(Token::Eq).ignore_then(expr.clone()).or_not())
            .map_with_span(|(((stars, name), array_dims), init), span| Declarator {
                pointer_depth: stars.len(),
                name,
                array_dims,
                init,
                span,
            });

        let decl = type_spec_parser()
            .then(declarator.separated_by(just(Token::Comma)).at_least(1))
            .then_ignore(just(Token::Semicolon))
            .map(|(ty, declarators)| StmtKind::Decl(DeclStmt { ty, declarators }))
            .map_with_span(|kind, span| Stmt { kind, span })
            .boxed();

        let block = stmt
            .clone()
            .repeated()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map(StmtKind::Block)
            .map_with_span(|kind, span| Stmt { kind, span });

        let return_stmt = just(Token::Return)
            .ignore_then(expr.clone().or_not())
            .then_ignore(just(Token::Semicolon))
            .map(StmtKind::Return)
            .map_with_span(|kind, span| Stmt { kind, span });

        let if_stmt = just(Token::If)
            .ignore_then(
                expr.clone()
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .then(stmt.clone())
            .then(just(Token::Else).ignore_then(stmt.clone()).or_not())
            .map(|((cond, then_branch), else_branch)| StmtKind::If {
                cond,
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
            })
            .map_with_span(|kind, span| Stmt { kind, span });

        let while_stmt = just(Token::While)
            .ignore_then(
                expr.clone()
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .then(stmt.clone())
            .map(|(cond, body)| StmtKind::While {
                cond,
                body: Box::new(body),
            })
            .map_with_span(|kind, span| Stmt { kind, span });

        let for_init = decl
            .clone()
            .or(expr
                .clone()
                .then_ignore(just(Token::Semicolon))
                .map(StmtKind::Expr)
                .map_with_span(|kind, span| Stmt { kind, span }))
            .or(just(Token::Semicolon)
                .to(StmtKind::Empty)
                .map_with_span(|kind, span| Stmt { kind, span }));

        let for_stmt = just(Token::For)
            .ignore_then(
                for_init
                    .then(expr.clone().or_not())
                    .then_ignore(just(Token::Semicolon))
                    .then(expr.clone().or_not())
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .then(stmt.clone())
            .map(|(((init, cond), step), body)| StmtKind::For {
                init: Some(Box::new(init)),
                cond,
                step,
                body: Box::new(body),
            })
            .map_with_span(|kind, span| Stmt { kind, span });

        let expr_stmt = expr
            .then_ignore(just(Token::Semicolon))
            .map(StmtKind::Expr)
            .map_with_span(|kind, span| Stmt { kind, span });

        let empty = just(Token::Semicolon)
            .to(StmtKind::Empty)
            .map_with_span(|kind, span| Stmt { kind, span });

        block
            .or(if_stmt)
            .or(while_stmt)
            .or(for_stmt)
            .or(return_stmt)
            .or(decl)
            .or(expr_stmt)
            .or(empty)
            .boxed()
    })
}

fn item_parser() -> impl Parser<Token, Item, Error = Simple<Token>> {
    let ident = select! { Token::Identifier(name) => name };
    let expr = expr_parser();

    let dim = expr
        .clone()
        .or_not()
        .delimited_by(just(Token::LBracket), just(Token::RBracket));

    let param = type_ref_parser()
        .then(ident.or_not())
        .then(dim.clone().repeated())
        .map_with_span(|((ty, name), array_dims), span| Param {
            ty,
            name,
            array_dims,
            span,
        });

    let function = type_ref_parser()
        .then(ident)
        .then(
            param
                .separated_by(just(Token::Comma))
                .allow_trailing()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
        )
        .then(
            stmt_parser()
                .map(Some)
                .or(just(Token::Semicolon).to(None)),
        )
        .map_with_span(|(((ret, name), params), body), span| FunctionDef {
            ret,
            name,
            params,
            body,
            span,
        })
        .boxed();

    let template_param = just(Token::Typename)
        .or(just(Token::Class))
        .ignore_then(ident);

    let template_item = just(Token::Template)
        .ignore_then(
            template_param
                .separated_by(just(Token::Comma))
                .at_least(1)
                .delimited_by(just(Token::Lt), just(Token::Gt)),
        )
        .then(function.clone())
        .map(|(params, func)| ItemKind::Template { params, func });

    let declarator = just(Token::Star)
        .repeated()
        .then(ident)
        .then(dim.repeated())
        .then(just(Token::Eq).ignore_then(expr).or_not())
        .map_with_span(|(((stars, name), array_dims), init), span| Declarator {
            pointer_depth: stars.len(),
            name,
            array_dims,
            init,
            span,
        });

    let global = type_spec_parser()
        .then(declarator.separated_by(just(Token::Comma)).at_least(1))
        .then_ignore(just(Token::Semicolon))
        .map(|(ty, declarators)| ItemKind::Global(DeclStmt { ty, declarators }));

    template_item
        .or(function.map(ItemKind::Function))
        .or(global)
        .map_with_span(|kind, span| Item { kind, span })
        .boxed()
}
