//! Abstract syntax tree for Zero programs.
//!
//! Expressions and statements are sum types; every node carries a `Span`.
//! The tree owns its children outright (identifier names are copied out of
//! the token stream, so the AST outlives the source-borrowing tokens).

use std::fmt;

use crate::source::Span;
use crate::types::Type;

/// Binary operators, in source notation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// A source-level type annotation.
#[derive(Debug, Clone, Copy)]
pub struct TypeAnnot {
    pub ty: Type,
    pub span: Span,
}

/// An expression node.
#[derive(Debug)]
pub enum Expr {
    Ident {
        name: String,
        span: Span,
    },
    IntLit {
        value: i64,
        span: Span,
    },
    FloatLit {
        value: f64,
        span: Span,
    },
    /// String literal with the surrounding quotes already stripped.
    StrLit {
        value: String,
        span: Span,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
        span: Span,
    },
    Group {
        inner: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident { span, .. }
            | Expr::IntLit { span, .. }
            | Expr::FloatLit { span, .. }
            | Expr::StrLit { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Call { span, .. }
            | Expr::Group { span, .. } => *span,
        }
    }
}

/// A statement node.
#[derive(Debug)]
pub enum Stmt {
    /// `let <name>[: <type>] = <expr>`
    Let {
        name: String,
        annot: Option<TypeAnnot>,
        init: Box<Expr>,
        span: Span,
    },
    /// `return [<expr>]`
    Return {
        value: Option<Box<Expr>>,
        span: Span,
    },
    Expr {
        expr: Box<Expr>,
        span: Span,
    },
    If {
        cond: Box<Expr>,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
        span: Span,
    },
    While {
        cond: Box<Expr>,
        body: Vec<Stmt>,
        span: Span,
    },
    Block {
        stmts: Vec<Stmt>,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Let { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Expr { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Block { span, .. } => *span,
        }
    }
}

/// A function parameter. An omitted type annotation leaves `ty` as `Unknown`.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// A function declaration.
#[derive(Debug)]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeAnnot>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A parsed program: an ordered list of function declarations.
#[derive(Debug, Default)]
pub struct Program {
    pub functions: Vec<FnDecl>,
}
