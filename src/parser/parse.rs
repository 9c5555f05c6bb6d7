//! Recursive-descent parser for Zero.
//!
//! Grammar (informal):
//! ```text
//! program   := { use_decl | fn_decl } EOF
//! fn_decl   := 'fn' IDENT '(' params? ')' ('->' type)? '{' stmt* '}'
//! params    := param { ',' param }
//! param     := IDENT (':' type)?
//! type      := 'int' | 'float' | 'void' | 'tensor' | IDENT
//! stmt      := let_stmt | return_stmt | if_stmt | while_stmt | block | expr_stmt
//! let_stmt  := 'let' IDENT (':' type)? '=' expr ';'?
//! expr      := equality  (precedence climbing below)
//! ```
//!
//! Binary levels from lowest to highest: equality, comparison, additive,
//! multiplicative; unary is right-associative. All binary levels are
//! left-associative.
//!
//! Errors are accumulated with panic-mode recovery: the first error in a
//! region is reported, cascades are suppressed, and the parser resynchronizes
//! at the next statement boundary.

use crate::error::SyntaxError;
use crate::parser::ast::{BinOp, Expr, FnDecl, Param, Program, Stmt, TypeAnnot, UnaryOp};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::source::{SourceFile, SourceId, Span};
use crate::types::{self, Type};

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    previous: Token<'src>,
    had_error: bool,
    panic_mode: bool,
    errors: Vec<SyntaxError>,
}

impl<'src> Parser<'src> {
    pub fn new(file: &'src SourceFile, source_id: SourceId) -> Self {
        let placeholder = Token {
            kind: TokenKind::Eof,
            span: Span::invalid(),
            text: "",
        };
        let mut parser = Self {
            lexer: Lexer::new(file, source_id),
            current: placeholder,
            previous: placeholder,
            had_error: false,
            panic_mode: false,
            errors: Vec::new(),
        };
        parser.advance();
        parser
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    // -----------------------------------------------------------------------
    // Token handling
    // -----------------------------------------------------------------------

    /// Advances past the next token. `Error` tokens from the lexer are
    /// reported through the normal error path and skipped.
    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.lexer.next();
            if !self.current.is_error() {
                break;
            }
            let span = self.current.span;
            let message = self.current.text.to_owned();
            self.error_at(span, message);
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn match_tok(&mut self, kind: TokenKind) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.check(kind) {
            self.advance();
            return;
        }
        self.error(message);
    }

    fn skip_newlines(&mut self) {
        while self.match_tok(TokenKind::Newline) {}
    }

    // -----------------------------------------------------------------------
    // Error handling
    // -----------------------------------------------------------------------

    fn error(&mut self, message: &str) {
        let span = self.current.span;
        self.error_at(span, message.to_owned());
    }

    fn error_at(&mut self, span: Span, message: String) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.had_error = true;
        self.errors.push(SyntaxError { message, span });
    }

    /// Skips tokens until a likely statement boundary: just past a
    /// semicolon/newline, or just before a statement-starting keyword.
    fn synchronize(&mut self) {
        self.panic_mode = false;

        while !self.current.is_eof() {
            if self.previous.kind == TokenKind::Semicolon
                || self.previous.kind == TokenKind::Newline
            {
                return;
            }
            match self.current.kind {
                TokenKind::Fn
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return => return,
                _ => {}
            }
            self.advance();
        }
    }

    // -----------------------------------------------------------------------
    // Top level
    // -----------------------------------------------------------------------

    pub fn parse(&mut self) -> Program {
        let mut program = Program::default();

        self.skip_newlines();

        while !self.current.is_eof() {
            // `use` declarations are accepted and discarded.
            if self.check(TokenKind::Use) {
                self.advance();
                if self.check(TokenKind::Ident) {
                    self.advance();
                }
                self.skip_newlines();
                continue;
            }

            if self.check(TokenKind::Fn) {
                let decl = self.parse_fn_decl();
                program.functions.push(decl);
            } else {
                let before = self.current.span;
                self.error("Expected function declaration");
                self.synchronize();
                // Synchronization can stop on a token no rule consumes;
                // force progress so recovery always terminates.
                if self.current.span == before && !self.current.is_eof() {
                    self.advance();
                }
            }
            self.skip_newlines();
        }

        program
    }

    fn parse_fn_decl(&mut self) -> FnDecl {
        let start = self.current.span;
        let mut fn_decl = FnDecl {
            name: String::new(),
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
            span: start,
        };

        self.consume(TokenKind::Fn, "Expected 'fn'");

        if !self.check(TokenKind::Ident) {
            self.error("Expected function name");
            return fn_decl;
        }
        fn_decl.name = self.current.text.to_owned();
        self.advance();

        self.consume(TokenKind::LParen, "Expected '(' after function name");
        fn_decl.params = self.parse_params();
        self.consume(TokenKind::RParen, "Expected ')' after parameters");

        if self.match_tok(TokenKind::Arrow) {
            fn_decl.return_type = Some(self.parse_type());
        }

        self.skip_newlines();
        self.consume(TokenKind::LBrace, "Expected '{' before function body");
        fn_decl.body = self.parse_stmt_list();
        self.consume(TokenKind::RBrace, "Expected '}' after function body");

        fn_decl.span = start.merge(self.previous.span);
        fn_decl
    }

    fn parse_params(&mut self) -> Vec<Param> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return params;
        }

        loop {
            if !self.check(TokenKind::Ident) {
                self.error("Expected parameter name");
                break;
            }
            let mut param = Param {
                name: self.current.text.to_owned(),
                ty: Type::Unknown,
                span: self.current.span,
            };
            self.advance();

            if self.match_tok(TokenKind::Colon) {
                param.ty = self.parse_type().ty;
            }

            params.push(param);
            if !self.match_tok(TokenKind::Comma) {
                break;
            }
        }

        params
    }

    fn parse_type(&mut self) -> TypeAnnot {
        let span = self.current.span;
        if self.check(TokenKind::Ident) {
            let ty = types::parse_type(self.current.text);
            self.advance();
            TypeAnnot { ty, span }
        } else {
            self.error("Expected type");
            TypeAnnot {
                ty: Type::Unknown,
                span,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    /// Parses statements up to a closing brace (or EOF), resynchronizing
    /// after each statement that errored.
    fn parse_stmt_list(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        self.skip_newlines();
        while !self.check(TokenKind::RBrace) && !self.current.is_eof() {
            let before = self.current.span;
            if let Some(stmt) = self.parse_stmt() {
                stmts.push(stmt);
            }
            if self.panic_mode {
                self.synchronize();
            }
            // Force progress when an errored statement consumed nothing.
            if self.current.span == before
                && !self.current.is_eof()
                && !self.check(TokenKind::RBrace)
            {
                self.advance();
            }
            self.skip_newlines();
        }
        stmts
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        self.skip_newlines();

        match self.current.kind {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::LBrace => self.parse_block(),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_let_stmt(&mut self) -> Option<Stmt> {
        let start = self.current.span;
        self.consume(TokenKind::Let, "Expected 'let'");

        if !self.check(TokenKind::Ident) {
            self.error("Expected variable name");
            return None;
        }
        let name = self.current.text.to_owned();
        self.advance();

        let annot = if self.match_tok(TokenKind::Colon) {
            Some(self.parse_type())
        } else {
            None
        };

        self.consume(TokenKind::Eq, "Expected '=' after variable name");
        let init = self.parse_expr()?;
        self.match_tok(TokenKind::Semicolon);

        Some(Stmt::Let {
            name,
            annot,
            init: Box::new(init),
            span: start.merge(self.previous.span),
        })
    }

    fn parse_return_stmt(&mut self) -> Option<Stmt> {
        let start = self.current.span;
        self.consume(TokenKind::Return, "Expected 'return'");

        let mut value = None;
        if !self.check(TokenKind::Semicolon)
            && !self.check(TokenKind::Newline)
            && !self.check(TokenKind::RBrace)
            && !self.current.is_eof()
        {
            value = self.parse_expr().map(Box::new);
        }

        self.match_tok(TokenKind::Semicolon);
        Some(Stmt::Return {
            value,
            span: start.merge(self.previous.span),
        })
    }

    fn parse_if_stmt(&mut self) -> Option<Stmt> {
        let start = self.current.span;
        self.consume(TokenKind::If, "Expected 'if'");
        let cond = self.parse_expr()?;

        self.skip_newlines();
        self.consume(TokenKind::LBrace, "Expected '{' after if condition");
        let then_branch = self.parse_stmt_list();
        self.consume(TokenKind::RBrace, "Expected '}' after if body");

        self.skip_newlines();
        let mut else_branch = Vec::new();
        if self.match_tok(TokenKind::Else) {
            self.skip_newlines();
            self.consume(TokenKind::LBrace, "Expected '{' after else");
            else_branch = self.parse_stmt_list();
            self.consume(TokenKind::RBrace, "Expected '}' after else body");
        }

        Some(Stmt::If {
            cond: Box::new(cond),
            then_branch,
            else_branch,
            span: start.merge(self.previous.span),
        })
    }

    fn parse_while_stmt(&mut self) -> Option<Stmt> {
        let start = self.current.span;
        self.consume(TokenKind::While, "Expected 'while'");
        let cond = self.parse_expr()?;

        self.skip_newlines();
        self.consume(TokenKind::LBrace, "Expected '{' after while condition");
        let body = self.parse_stmt_list();
        self.consume(TokenKind::RBrace, "Expected '}' after while body");

        Some(Stmt::While {
            cond: Box::new(cond),
            body,
            span: start.merge(self.previous.span),
        })
    }

    fn parse_block(&mut self) -> Option<Stmt> {
        let start = self.current.span;
        self.consume(TokenKind::LBrace, "Expected '{'");
        let stmts = self.parse_stmt_list();
        self.consume(TokenKind::RBrace, "Expected '}'");

        Some(Stmt::Block {
            stmts,
            span: start.merge(self.previous.span),
        })
    }

    fn parse_expr_stmt(&mut self) -> Option<Stmt> {
        let expr = self.parse_expr();
        self.match_tok(TokenKind::Semicolon);
        let expr = expr?;
        Some(Stmt::Expr {
            span: expr.span(),
            expr: Box::new(expr),
        })
    }

    // -----------------------------------------------------------------------
    // Expressions (precedence climbing)
    // -----------------------------------------------------------------------

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut expr = self.parse_comparison()?;

        while self.match_tok(TokenKind::EqEq) || self.match_tok(TokenKind::BangEq) {
            let op = if self.previous.kind == TokenKind::EqEq {
                BinOp::Eq
            } else {
                BinOp::Ne
            };
            let Some(rhs) = self.parse_comparison() else {
                return Some(expr);
            };
            let span = expr.span().merge(rhs.span());
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                span,
            };
        }

        Some(expr)
    }

    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut expr = self.parse_term()?;

        while self.match_tok(TokenKind::Lt)
            || self.match_tok(TokenKind::Gt)
            || self.match_tok(TokenKind::LtEq)
            || self.match_tok(TokenKind::GtEq)
        {
            let op = match self.previous.kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::LtEq => BinOp::Le,
                _ => BinOp::Ge,
            };
            let Some(rhs) = self.parse_term() else {
                return Some(expr);
            };
            let span = expr.span().merge(rhs.span());
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                span,
            };
        }

        Some(expr)
    }

    fn parse_term(&mut self) -> Option<Expr> {
        let mut expr = self.parse_factor()?;

        while self.match_tok(TokenKind::Plus) || self.match_tok(TokenKind::Minus) {
            let op = if self.previous.kind == TokenKind::Plus {
                BinOp::Add
            } else {
                BinOp::Sub
            };
            let Some(rhs) = self.parse_factor() else {
                return Some(expr);
            };
            let span = expr.span().merge(rhs.span());
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                span,
            };
        }

        Some(expr)
    }

    fn parse_factor(&mut self) -> Option<Expr> {
        let mut expr = self.parse_unary()?;

        while self.match_tok(TokenKind::Star) || self.match_tok(TokenKind::Slash) {
            let op = if self.previous.kind == TokenKind::Star {
                BinOp::Mul
            } else {
                BinOp::Div
            };
            let Some(rhs) = self.parse_unary() else {
                return Some(expr);
            };
            let span = expr.span().merge(rhs.span());
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
                span,
            };
        }

        Some(expr)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        if self.match_tok(TokenKind::Minus) || self.match_tok(TokenKind::Bang) {
            let op = if self.previous.kind == TokenKind::Minus {
                UnaryOp::Neg
            } else {
                UnaryOp::Not
            };
            let start = self.previous.span;
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span());
            return Some(Expr::Unary {
                op,
                operand: Box::new(operand),
                span,
            });
        }

        self.parse_call()
    }

    fn parse_call(&mut self) -> Option<Expr> {
        let expr = self.parse_primary()?;

        // An identifier followed by '(' is a call.
        if let Expr::Ident { name, span } = &expr {
            if self.check(TokenKind::LParen) {
                let callee = name.clone();
                let start = *span;
                self.advance();

                let mut args = Vec::new();
                if !self.check(TokenKind::RParen) {
                    loop {
                        // Keyword-argument sugar: a leading `label =` is
                        // consumed and discarded; only the expression is kept.
                        if self.check(TokenKind::Ident)
                            && self.lexer.peek().kind == TokenKind::Eq
                        {
                            self.advance();
                            self.advance();
                        }
                        if let Some(arg) = self.parse_expr() {
                            args.push(arg);
                        }
                        if !self.match_tok(TokenKind::Comma) {
                            break;
                        }
                    }
                }

                self.consume(TokenKind::RParen, "Expected ')' after arguments");
                return Some(Expr::Call {
                    callee,
                    args,
                    span: start.merge(self.previous.span),
                });
            }
        }

        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        if self.match_tok(TokenKind::IntLit) {
            return Some(Expr::IntLit {
                value: self.previous.text.parse().unwrap_or(0),
                span: self.previous.span,
            });
        }

        if self.match_tok(TokenKind::FloatLit) {
            return Some(Expr::FloatLit {
                value: self.previous.text.parse().unwrap_or(0.0),
                span: self.previous.span,
            });
        }

        if self.match_tok(TokenKind::StringLit) {
            let text = self.previous.text;
            let value = if text.len() >= 2 {
                text[1..text.len() - 1].to_owned()
            } else {
                String::new()
            };
            return Some(Expr::StrLit {
                value,
                span: self.previous.span,
            });
        }

        if self.match_tok(TokenKind::Ident) {
            return Some(Expr::Ident {
                name: self.previous.text.to_owned(),
                span: self.previous.span,
            });
        }

        if self.match_tok(TokenKind::LParen) {
            let start = self.previous.span;
            let inner = self.parse_expr();
            self.consume(TokenKind::RParen, "Expected ')' after expression");
            let inner = inner?;
            return Some(Expr::Group {
                inner: Box::new(inner),
                span: start.merge(self.previous.span),
            });
        }

        self.error("Expected expression");
        None
    }
}
