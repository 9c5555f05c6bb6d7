//! AST → IR lowering.
//!
//! Walks a validated AST and constructs an SSA `Module` through `Builder`.
//! Plain locals are pure SSA: a `let` binds the source name to the value of
//! its initializer in a flat per-function symbol table, and no allocas are
//! emitted. Control flow lowers to the block shapes below, with block ids
//! allocated in creation order so printer output is deterministic.
//!
//! ```text
//! if C { T } else { E }          while C { B }
//!
//!   %c = <C>                       br while.cond
//!   cond_br %c, if.then, if.else  while.cond:
//! if.then:                          %c = <C>
//!   <T>                             cond_br %c, while.body, while.end
//!   br if.end                     while.body:
//! if.else:                          <B>
//!   <E>                             br while.cond
//!   br if.end                     while.end:
//! if.end:
//! ```
//!
//! (`if.else` collapses into `if.end` when the else branch is empty.)

use std::collections::HashMap;

use crate::ir::builder::Builder;
use crate::ir::function::Function;
use crate::ir::instr::{BinOp, CmpOp};
use crate::ir::module::Module;
use crate::ir::value::Value;
use crate::parser::ast::{self, Expr, FnDecl, Program, Stmt, UnaryOp};
use crate::types::Type;

/// Lowers a program to an IR module. Lowering is infallible: the semantic
/// analyzer has already rejected bad programs, and any residual undefined
/// name lowers to the invalid value.
pub fn lower(program: &Program) -> Module {
    let mut module = Module::new();
    let mut lowering = Lowering::default();

    for fn_decl in &program.functions {
        let func = lowering.lower_function(fn_decl);
        log::debug!(
            "lowered fn '{}' ({} block(s))",
            func.name,
            func.blocks.len()
        );
        module.add_function(func);
    }

    module
}

#[derive(Default)]
struct Lowering {
    /// Most recent SSA definition for each source name. Reset per function.
    symbols: HashMap<String, Value>,
}

impl Lowering {
    fn lower_function(&mut self, fn_decl: &FnDecl) -> Function {
        let param_types: Vec<Type> = fn_decl.params.iter().map(|p| p.ty).collect();
        let return_type = fn_decl
            .return_type
            .map(|annot| annot.ty)
            .unwrap_or(Type::Void);

        let mut func = Function::new(&fn_decl.name, param_types, return_type);

        // Parameters exist as pre-allocated SSA values, not instructions;
        // bind their names so the body can refer to them.
        self.symbols.clear();
        for (param, &value) in fn_decl.params.iter().zip(func.param_values.iter()) {
            self.symbols.insert(param.name.clone(), value);
        }

        let mut builder = Builder::new(&mut func);
        for stmt in &fn_decl.body {
            self.lower_stmt(&mut builder, stmt);
        }

        // Implicit void return when control falls off the end.
        if !builder.is_terminated() {
            builder.ret(None);
        }

        func
    }

    fn lower_stmt(&mut self, builder: &mut Builder, stmt: &Stmt) {
        match stmt {
            Stmt::Let { name, init, .. } => {
                let value = self.lower_expr(builder, init);
                self.symbols.insert(name.clone(), value);
            }

            Stmt::Return { value, .. } => match value {
                Some(expr) => {
                    let value = self.lower_expr(builder, expr);
                    builder.ret(Some(value));
                }
                None => builder.ret(None),
            },

            Stmt::Expr { expr, .. } => {
                self.lower_expr(builder, expr);
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => self.lower_if(builder, cond, then_branch, else_branch),

            Stmt::While { cond, body, .. } => self.lower_while(builder, cond, body),

            Stmt::Block { stmts, .. } => {
                for stmt in stmts {
                    self.lower_stmt(builder, stmt);
                }
            }
        }
    }

    fn lower_if(
        &mut self,
        builder: &mut Builder,
        cond: &Expr,
        then_branch: &[Stmt],
        else_branch: &[Stmt],
    ) {
        let cond_value = self.lower_expr(builder, cond);

        let then_block = builder.create_block("if.then");
        let merge_block = builder.create_block("if.end");

        if else_branch.is_empty() {
            builder.cond_br(cond_value, then_block, merge_block);
        } else {
            let else_block = builder.create_block("if.else");
            builder.cond_br(cond_value, then_block, else_block);

            builder.set_insert_point(else_block);
            for stmt in else_branch {
                self.lower_stmt(builder, stmt);
            }
            if !builder.is_terminated() {
                builder.br(merge_block);
            }
        }

        builder.set_insert_point(then_block);
        for stmt in then_branch {
            self.lower_stmt(builder, stmt);
        }
        if !builder.is_terminated() {
            builder.br(merge_block);
        }

        builder.set_insert_point(merge_block);
    }

    fn lower_while(&mut self, builder: &mut Builder, cond: &Expr, body: &[Stmt]) {
        let cond_block = builder.create_block("while.cond");
        let body_block = builder.create_block("while.body");
        let end_block = builder.create_block("while.end");

        builder.br(cond_block);

        builder.set_insert_point(cond_block);
        let cond_value = self.lower_expr(builder, cond);
        builder.cond_br(cond_value, body_block, end_block);

        builder.set_insert_point(body_block);
        for stmt in body {
            self.lower_stmt(builder, stmt);
        }
        if !builder.is_terminated() {
            builder.br(cond_block);
        }

        builder.set_insert_point(end_block);
    }

    fn lower_expr(&mut self, builder: &mut Builder, expr: &Expr) -> Value {
        match expr {
            Expr::Ident { name, .. } => {
                self.symbols.get(name).copied().unwrap_or(Value::INVALID)
            }

            Expr::IntLit { value, .. } => builder.const_int(*value),
            Expr::FloatLit { value, .. } => builder.const_float(*value),
            Expr::StrLit { value, .. } => builder.const_str(value.clone()),

            Expr::Binary { op, lhs, rhs, .. } => {
                let lhs = self.lower_expr(builder, lhs);
                let rhs = self.lower_expr(builder, rhs);
                match op {
                    ast::BinOp::Add => builder.binary(BinOp::Add, lhs, rhs),
                    ast::BinOp::Sub => builder.binary(BinOp::Sub, lhs, rhs),
                    ast::BinOp::Mul => builder.binary(BinOp::Mul, lhs, rhs),
                    ast::BinOp::Div => builder.binary(BinOp::Div, lhs, rhs),
                    ast::BinOp::Eq => builder.cmp(CmpOp::Eq, lhs, rhs),
                    ast::BinOp::Ne => builder.cmp(CmpOp::Ne, lhs, rhs),
                    ast::BinOp::Lt => builder.cmp(CmpOp::Lt, lhs, rhs),
                    ast::BinOp::Le => builder.cmp(CmpOp::Le, lhs, rhs),
                    ast::BinOp::Gt => builder.cmp(CmpOp::Gt, lhs, rhs),
                    ast::BinOp::Ge => builder.cmp(CmpOp::Ge, lhs, rhs),
                }
            }

            Expr::Unary { op, operand, .. } => {
                let value = self.lower_expr(builder, operand);
                match op {
                    UnaryOp::Neg => builder.neg(value),
                    // NOT is reserved; the operand passes through unchanged.
                    UnaryOp::Not => value,
                }
            }

            Expr::Call { callee, args, .. } => {
                let args: Vec<Value> = args
                    .iter()
                    .map(|arg| self.lower_expr(builder, arg))
                    .collect();
                // Static return types are not resolved during lowering; the
                // interpreter dispatches by name and stores the actual result.
                builder.call(callee, args, Type::Void)
            }

            Expr::Group { inner, .. } => self.lower_expr(builder, inner),
        }
    }
}
