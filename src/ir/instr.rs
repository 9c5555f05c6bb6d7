use std::fmt;

use crate::ir::block::BlockId;
use crate::ir::value::Value;

/// Binary arithmetic opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
        };
        f.write_str(s)
    }
}

/// Comparison opcodes. Results are int-typed (0 or 1); no boolean exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "eq",
            CmpOp::Ne => "ne",
            CmpOp::Lt => "lt",
            CmpOp::Le => "le",
            CmpOp::Gt => "gt",
            CmpOp::Ge => "ge",
        };
        f.write_str(s)
    }
}

/// Tensor opcodes. Reserved for runtime linkage: they parse, lower, and
/// print, but the interpreter evaluates them as null placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorOp {
    Alloc,
    Add,
    Sub,
    Mul,
    Matmul,
    Relu,
}

impl fmt::Display for TensorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TensorOp::Alloc => "tensor.alloc",
            TensorOp::Add => "tensor.add",
            TensorOp::Sub => "tensor.sub",
            TensorOp::Mul => "tensor.mul",
            TensorOp::Matmul => "tensor.matmul",
            TensorOp::Relu => "tensor.relu",
        };
        f.write_str(s)
    }
}

/// A single instruction in SSA form.
///
/// Invariants:
/// - Every value-producing instruction has exactly one result `Value`.
/// - Terminators (`Ret`, `Br`, `CondBr`) end their block; nothing follows them
///   in a well-formed block.
#[derive(Debug)]
pub enum Instr {
    Nop,

    // ---- Constants ----
    ConstInt {
        result: Value,
        value: i64,
    },
    ConstFloat {
        result: Value,
        value: f64,
    },
    ConstStr {
        result: Value,
        value: String,
    },

    // ---- Arithmetic ----
    BinOp {
        result: Value,
        op: BinOp,
        lhs: Value,
        rhs: Value,
    },
    Neg {
        result: Value,
        operand: Value,
    },

    // ---- Comparison ----
    Cmp {
        result: Value,
        op: CmpOp,
        lhs: Value,
        rhs: Value,
    },

    // ---- Control flow ----
    Call {
        result: Value,
        callee: String,
        args: Vec<Value>,
    },
    Ret {
        value: Option<Value>,
    },
    Br {
        target: BlockId,
    },
    CondBr {
        cond: Value,
        then_block: BlockId,
        else_block: BlockId,
    },

    // ---- Memory (reserved for mutable-local support) ----
    Alloca {
        result: Value,
    },
    Load {
        result: Value,
        ptr: Value,
    },
    Store {
        ptr: Value,
        value: Value,
    },

    // ---- Tensor placeholders ----
    TensorOp {
        result: Value,
        op: TensorOp,
        args: Vec<Value>,
    },
}

impl Instr {
    /// The `Value` produced by this instruction, if any.
    pub fn result(&self) -> Option<Value> {
        match self {
            Instr::Nop | Instr::Ret { .. } | Instr::Br { .. } | Instr::CondBr { .. } => None,
            Instr::Store { .. } => None,
            Instr::ConstInt { result, .. }
            | Instr::ConstFloat { result, .. }
            | Instr::ConstStr { result, .. }
            | Instr::BinOp { result, .. }
            | Instr::Neg { result, .. }
            | Instr::Cmp { result, .. }
            | Instr::Alloca { result }
            | Instr::Load { result, .. }
            | Instr::TensorOp { result, .. } => Some(*result),
            Instr::Call { result, .. } => {
                if result.is_valid() {
                    Some(*result)
                } else {
                    None
                }
            }
        }
    }

    /// All `Value`s consumed by this instruction.
    pub fn operands(&self) -> Vec<Value> {
        match self {
            Instr::Nop
            | Instr::ConstInt { .. }
            | Instr::ConstFloat { .. }
            | Instr::ConstStr { .. }
            | Instr::Alloca { .. }
            | Instr::Br { .. } => vec![],
            Instr::BinOp { lhs, rhs, .. } | Instr::Cmp { lhs, rhs, .. } => vec![*lhs, *rhs],
            Instr::Neg { operand, .. } => vec![*operand],
            Instr::Call { args, .. } => args.clone(),
            Instr::Ret { value } => value.iter().copied().collect(),
            Instr::CondBr { cond, .. } => vec![*cond],
            Instr::Load { ptr, .. } => vec![*ptr],
            Instr::Store { ptr, value } => vec![*ptr, *value],
            Instr::TensorOp { args, .. } => args.clone(),
        }
    }

    /// Returns `true` for instructions that transfer control.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Instr::Ret { .. } | Instr::Br { .. } | Instr::CondBr { .. })
    }
}
