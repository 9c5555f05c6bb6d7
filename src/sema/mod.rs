//! Semantic analysis: name resolution and type checking.
//!
//! Analysis runs in two passes. The first collects every function signature
//! into a flat global namespace; the second checks each body against a stack
//! of lexical scopes. Errors are accumulated and analysis never aborts
//! early, so one compile reports everything it can find.

use std::collections::HashMap;

use crate::error::{SemaError, SemaErrorKind};
use crate::parser::ast::{Expr, FnDecl, Program, Stmt};
use crate::source::Span;
use crate::types::{binary_result_type, types_compatible, Type};

/// A collected function signature.
#[derive(Debug, Clone)]
pub struct FnSignature {
    pub name: String,
    pub param_types: Vec<Type>,
    pub return_type: Type,
}

pub struct Sema {
    /// Scope stack; innermost scope is last.
    scopes: Vec<HashMap<String, Type>>,
    /// Global function namespace, populated in the signature pre-pass.
    functions: HashMap<String, FnSignature>,
    /// Host-provided functions (registered with the interpreter by the
    /// driver). Calls to these skip arity checking and type as `Unknown`.
    externals: Vec<String>,
    /// Declared return type of the function being checked; `Unknown` when
    /// the function has no annotation (lenient checking).
    current_return_type: Type,
    errors: Vec<SemaError>,
}

impl Default for Sema {
    fn default() -> Self {
        Self::new()
    }
}

impl Sema {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            functions: HashMap::new(),
            externals: Vec::new(),
            current_return_type: Type::Unknown,
            errors: Vec::new(),
        }
    }

    /// Registers the name of a host-provided external function.
    pub fn declare_external(&mut self, name: &str) {
        self.externals.push(name.to_owned());
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SemaError] {
        &self.errors
    }

    pub fn signature(&self, name: &str) -> Option<&FnSignature> {
        self.functions.get(name)
    }

    pub fn analyze(&mut self, program: &Program) {
        self.collect_functions(program);
        for fn_decl in &program.functions {
            self.check_fn(fn_decl);
        }
        log::debug!(
            "sema: {} function(s), {} error(s)",
            program.functions.len(),
            self.errors.len()
        );
    }

    // -----------------------------------------------------------------------
    // Scope management
    // -----------------------------------------------------------------------

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &str, ty: Type, span: Span) {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        let current = self.scopes.last_mut().expect("scope stack is non-empty");
        if current.contains_key(name) {
            self.error(
                SemaErrorKind::DuplicateDefinition,
                format!("Variable '{}' already declared in this scope", name),
                span,
            );
            return;
        }
        current.insert(name.to_owned(), ty);
    }

    fn lookup(&self, name: &str) -> Option<Type> {
        for scope in self.scopes.iter().rev() {
            if let Some(ty) = scope.get(name) {
                return Some(*ty);
            }
        }
        None
    }

    fn error(&mut self, kind: SemaErrorKind, message: String, span: Span) {
        self.errors.push(SemaError {
            kind,
            message,
            span,
        });
    }

    // -----------------------------------------------------------------------
    // Pass 1: signature collection
    // -----------------------------------------------------------------------

    fn collect_functions(&mut self, program: &Program) {
        for fn_decl in &program.functions {
            let sig = FnSignature {
                name: fn_decl.name.clone(),
                param_types: fn_decl.params.iter().map(|p| p.ty).collect(),
                return_type: fn_decl
                    .return_type
                    .map(|annot| annot.ty)
                    .unwrap_or(Type::Void),
            };

            if self.functions.contains_key(&fn_decl.name) {
                self.error(
                    SemaErrorKind::DuplicateDefinition,
                    format!("Function '{}' already defined", fn_decl.name),
                    fn_decl.span,
                );
            } else {
                self.functions.insert(fn_decl.name.clone(), sig);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Pass 2: body checking
    // -----------------------------------------------------------------------

    fn check_fn(&mut self, fn_decl: &FnDecl) {
        self.push_scope();

        // Without an annotation, return statements are checked leniently.
        self.current_return_type = fn_decl
            .return_type
            .map(|annot| annot.ty)
            .unwrap_or(Type::Unknown);

        for param in &fn_decl.params {
            self.declare(&param.name, param.ty, param.span);
        }

        for stmt in &fn_decl.body {
            self.check_stmt(stmt);
        }

        self.pop_scope();
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let {
                name,
                annot,
                init,
                span,
            } => {
                let init_type = self.check_expr(init);

                let mut var_type = init_type;
                if let Some(annot) = annot {
                    var_type = annot.ty;
                    if !init_type.is_unknown() && !types_compatible(var_type, init_type) {
                        self.error(
                            SemaErrorKind::TypeMismatch,
                            format!("Type mismatch: expected {}, got {}", var_type, init_type),
                            *span,
                        );
                    }
                }

                self.declare(name, var_type, *span);
            }

            Stmt::Return { value, span } => {
                let ret_type = match value {
                    Some(expr) => self.check_expr(expr),
                    None => Type::Void,
                };

                if !types_compatible(self.current_return_type, ret_type) {
                    self.error(
                        SemaErrorKind::ReturnTypeMismatch,
                        format!(
                            "Return type mismatch: expected {}, got {}",
                            self.current_return_type, ret_type
                        ),
                        *span,
                    );
                }
            }

            Stmt::Expr { expr, .. } => {
                self.check_expr(expr);
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                // No boolean type exists; the condition's type is unused.
                self.check_expr(cond);

                self.push_scope();
                for stmt in then_branch {
                    self.check_stmt(stmt);
                }
                self.pop_scope();

                if !else_branch.is_empty() {
                    self.push_scope();
                    for stmt in else_branch {
                        self.check_stmt(stmt);
                    }
                    self.pop_scope();
                }
            }

            Stmt::While { cond, body, .. } => {
                self.check_expr(cond);

                self.push_scope();
                for stmt in body {
                    self.check_stmt(stmt);
                }
                self.pop_scope();
            }

            Stmt::Block { stmts, .. } => {
                self.push_scope();
                for stmt in stmts {
                    self.check_stmt(stmt);
                }
                self.pop_scope();
            }
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Ident { name, span } => match self.lookup(name) {
                Some(ty) => ty,
                None => {
                    self.error(
                        SemaErrorKind::UndefinedVariable,
                        format!("Undefined variable: {}", name),
                        *span,
                    );
                    Type::Unknown
                }
            },

            Expr::IntLit { .. } => Type::Int,
            Expr::FloatLit { .. } => Type::Float,
            // Strings are opaque for now.
            Expr::StrLit { .. } => Type::Unknown,

            Expr::Binary { lhs, rhs, .. } => {
                let left = self.check_expr(lhs);
                let right = self.check_expr(rhs);
                binary_result_type(left, right)
            }

            Expr::Unary { operand, .. } => self.check_expr(operand),

            Expr::Call { callee, args, span } => self.check_call(callee, args, *span),

            Expr::Group { inner, .. } => self.check_expr(inner),
        }
    }

    fn check_call(&mut self, callee: &str, args: &[Expr], span: Span) -> Type {
        // Externals are variadic and untyped from the checker's viewpoint.
        if self.externals.iter().any(|n| n == callee) {
            for arg in args {
                self.check_expr(arg);
            }
            return Type::Unknown;
        }

        let Some(sig) = self.functions.get(callee).cloned() else {
            self.error(
                SemaErrorKind::UndefinedFunction,
                format!("Undefined function: {}", callee),
                span,
            );
            // Arguments are still checked so their own errors surface.
            for arg in args {
                self.check_expr(arg);
            }
            return Type::Unknown;
        };

        if args.len() != sig.param_types.len() {
            self.error(
                SemaErrorKind::WrongArgCount,
                format!(
                    "Function '{}' expects {} arguments, got {}",
                    callee,
                    sig.param_types.len(),
                    args.len()
                ),
                span,
            );
        }

        for (i, arg) in args.iter().enumerate() {
            let arg_type = self.check_expr(arg);
            if let Some(&param_type) = sig.param_types.get(i) {
                if !types_compatible(param_type, arg_type) {
                    self.error(
                        SemaErrorKind::TypeMismatch,
                        format!("Argument {} type mismatch", i + 1),
                        arg.span(),
                    );
                }
            }
        }

        sig.return_type
    }
}
