//! Tree-walking IR interpreter.
//!
//! Executes a `Module` by stepping through SSA instructions one basic block
//! at a time. Each call gets its own value environment (SSA id → runtime
//! value); the caller materializes argument values and binds them to the
//! callee's parameter ids before execution starts.
//!
//! Error policy: only a missing entry function is fatal. Division by zero
//! yields 0, lookups of undefined SSA ids yield `Void`, and unknown callees
//! evaluate to `Void`.

use std::collections::HashMap;
use std::fmt;

use crate::error::InterpError;
use crate::ir::function::Function;
use crate::ir::instr::{BinOp, CmpOp, Instr};
use crate::ir::module::Module;
use crate::ir::value::Value;

/// A runtime value produced or consumed during interpretation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RuntimeValue {
    #[default]
    Void,
    Int(i64),
    Float(f64),
    /// Opaque handle reserved for tensor runtime linkage; always null here.
    Ptr(usize),
    Str(String),
}

impl RuntimeValue {
    pub fn is_void(&self) -> bool {
        matches!(self, RuntimeValue::Void)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, RuntimeValue::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, RuntimeValue::Float(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, RuntimeValue::Str(_))
    }

    /// Numeric coercion to int; non-numeric values coerce to 0.
    pub fn to_int(&self) -> i64 {
        match self {
            RuntimeValue::Int(n) => *n,
            RuntimeValue::Float(x) => *x as i64,
            _ => 0,
        }
    }

    /// Numeric coercion to float; non-numeric values coerce to 0.0.
    pub fn to_float(&self) -> f64 {
        match self {
            RuntimeValue::Float(x) => *x,
            RuntimeValue::Int(n) => *n as f64,
            _ => 0.0,
        }
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Void => f.write_str("void"),
            RuntimeValue::Int(n) => write!(f, "{}", n),
            RuntimeValue::Float(x) => write!(f, "{}", x),
            RuntimeValue::Ptr(p) => write!(f, "<ptr:{:#x}>", p),
            RuntimeValue::Str(s) => f.write_str(s),
        }
    }
}

/// A host-provided function callable from Zero code by name.
pub type ExternalFn = Box<dyn Fn(&[RuntimeValue]) -> RuntimeValue>;

/// Per-call environment: SSA id → runtime value.
type Env = HashMap<u32, RuntimeValue>;

/// The interpreter. Register externals before calling `execute`; mutating
/// the registry during execution is not supported.
#[derive(Default)]
pub struct Interpreter {
    externals: HashMap<String, ExternalFn>,
    exit_code: i32,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_external<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[RuntimeValue]) -> RuntimeValue + 'static,
    {
        self.externals.insert(name.to_owned(), Box::new(func));
    }

    /// Exit code derived from the entry function's return value: the low
    /// 32 bits of an int result, 0 otherwise.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Executes `entry` with no arguments and returns its result.
    pub fn execute(&mut self, module: &Module, entry: &str) -> Result<RuntimeValue, InterpError> {
        let entry_fn = module.get_function(entry).ok_or_else(|| {
            InterpError::EntryNotFound {
                name: entry.to_owned(),
            }
        })?;

        log::debug!("executing entry fn '{}'", entry);
        let result = self.call_function(module, entry_fn, Vec::new());

        self.exit_code = match result {
            RuntimeValue::Int(n) => n as i32,
            _ => 0,
        };

        Ok(result)
    }

    /// Runs one function to completion in a fresh environment.
    ///
    /// Frame control: `Ret` pops the frame with its operand's value; `Br`/
    /// `CondBr` reset the instruction cursor at the target block; a block
    /// that ends without a terminator falls through to the next block, and
    /// running off the last block returns `Void`.
    fn call_function(
        &self,
        module: &Module,
        func: &Function,
        args: Vec<RuntimeValue>,
    ) -> RuntimeValue {
        let mut env = Env::new();

        for (param, arg) in func.param_values.iter().zip(args) {
            env.insert(param.id, arg);
        }

        let mut block_idx = 0usize;
        let mut instr_idx = 0usize;

        loop {
            let Some(block) = func.blocks.get(block_idx) else {
                return RuntimeValue::Void;
            };

            let Some(instr) = block.instrs.get(instr_idx) else {
                // Unterminated block: fall through if a next block exists.
                if block_idx + 1 < func.blocks.len() {
                    block_idx += 1;
                    instr_idx = 0;
                    continue;
                }
                return RuntimeValue::Void;
            };

            match instr {
                Instr::Ret { value } => {
                    return match value {
                        Some(v) => get_value(&env, *v),
                        None => RuntimeValue::Void,
                    };
                }
                Instr::Br { target } => {
                    block_idx = target.0 as usize;
                    instr_idx = 0;
                }
                Instr::CondBr {
                    cond,
                    then_block,
                    else_block,
                } => {
                    let taken = if get_value(&env, *cond).to_int() != 0 {
                        then_block
                    } else {
                        else_block
                    };
                    block_idx = taken.0 as usize;
                    instr_idx = 0;
                }
                _ => {
                    let result = self.exec_instr(module, instr, &env);
                    if let Some(dest) = instr.result() {
                        env.insert(dest.id, result);
                    }
                    instr_idx += 1;
                }
            }
        }
    }

    fn exec_instr(&self, module: &Module, instr: &Instr, env: &Env) -> RuntimeValue {
        match instr {
            Instr::Nop => RuntimeValue::Void,

            Instr::ConstInt { value, .. } => RuntimeValue::Int(*value),
            Instr::ConstFloat { value, .. } => RuntimeValue::Float(*value),
            Instr::ConstStr { value, .. } => RuntimeValue::Str(value.clone()),

            Instr::BinOp { op, lhs, rhs, .. } => {
                let lhs = get_value(env, *lhs);
                let rhs = get_value(env, *rhs);
                eval_binop(*op, &lhs, &rhs)
            }

            Instr::Neg { operand, .. } => match get_value(env, *operand) {
                RuntimeValue::Float(x) => RuntimeValue::Float(-x),
                v => RuntimeValue::Int(-v.to_int()),
            },

            Instr::Cmp { op, lhs, rhs, .. } => {
                let lhs = get_value(env, *lhs).to_int();
                let rhs = get_value(env, *rhs).to_int();
                let result = match op {
                    CmpOp::Eq => lhs == rhs,
                    CmpOp::Ne => lhs != rhs,
                    CmpOp::Lt => lhs < rhs,
                    CmpOp::Le => lhs <= rhs,
                    CmpOp::Gt => lhs > rhs,
                    CmpOp::Ge => lhs >= rhs,
                };
                RuntimeValue::Int(result as i64)
            }

            Instr::Call { callee, args, .. } => {
                let args: Vec<RuntimeValue> =
                    args.iter().map(|arg| get_value(env, *arg)).collect();

                if let Some(external) = self.externals.get(callee) {
                    external(&args)
                } else if let Some(func) = module.get_function(callee) {
                    self.call_function(module, func, args)
                } else {
                    RuntimeValue::Void
                }
            }

            // Placeholder semantics until mutable locals arrive.
            Instr::Alloca { .. } => RuntimeValue::Int(0),
            Instr::Load { ptr, .. } => get_value(env, *ptr),
            Instr::Store { .. } => RuntimeValue::Void,

            // Tensor opcodes await runtime linkage; they yield a null handle.
            Instr::TensorOp { .. } => RuntimeValue::Ptr(0),

            // Terminators are handled by the frame loop.
            Instr::Ret { .. } | Instr::Br { .. } | Instr::CondBr { .. } => RuntimeValue::Void,
        }
    }
}

fn get_value(env: &Env, value: Value) -> RuntimeValue {
    env.get(&value.id).cloned().unwrap_or_default()
}

/// Arithmetic with runtime numeric promotion: if either operand is a float,
/// both are promoted and the result is a float. Integer division by zero
/// yields 0 rather than trapping; float division follows IEEE-754.
fn eval_binop(op: BinOp, lhs: &RuntimeValue, rhs: &RuntimeValue) -> RuntimeValue {
    if lhs.is_float() || rhs.is_float() {
        let l = lhs.to_float();
        let r = rhs.to_float();
        let result = match op {
            BinOp::Add => l + r,
            BinOp::Sub => l - r,
            BinOp::Mul => l * r,
            BinOp::Div => l / r,
        };
        RuntimeValue::Float(result)
    } else {
        let l = lhs.to_int();
        let r = rhs.to_int();
        let result = match op {
            BinOp::Add => l + r,
            BinOp::Sub => l - r,
            BinOp::Mul => l * r,
            BinOp::Div => {
                if r != 0 {
                    l / r
                } else {
                    0
                }
            }
        };
        RuntimeValue::Int(result)
    }
}
