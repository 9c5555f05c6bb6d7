//! Instruction builder: tracks an insertion point within a function and
//! provides typed emit helpers for each opcode.

use crate::ir::block::BlockId;
use crate::ir::function::Function;
use crate::ir::instr::{BinOp, CmpOp, Instr, TensorOp};
use crate::ir::value::Value;
use crate::types::{binary_result_type, Type};

pub struct Builder<'f> {
    func: &'f mut Function,
    insert_block: BlockId,
}

impl<'f> Builder<'f> {
    /// Creates a builder over `func`, allocating an `entry` block if the
    /// function has none, and pointing the cursor at the entry.
    pub fn new(func: &'f mut Function) -> Self {
        if func.blocks.is_empty() {
            func.new_block("entry");
        }
        Self {
            func,
            insert_block: BlockId(0),
        }
    }

    // -----------------------------------------------------------------------
    // Block management
    // -----------------------------------------------------------------------

    pub fn create_block(&mut self, label: &str) -> BlockId {
        self.func.new_block(label)
    }

    pub fn set_insert_point(&mut self, block: BlockId) {
        self.insert_block = block;
    }

    pub fn current_block(&self) -> BlockId {
        self.insert_block
    }

    /// Whether the insertion block already ends with a terminator.
    pub fn is_terminated(&self) -> bool {
        self.func
            .block(self.insert_block)
            .map(|b| b.is_terminated())
            .unwrap_or(false)
    }

    fn emit(&mut self, instr: Instr) {
        self.func.block_mut(self.insert_block).push(instr);
    }

    // -----------------------------------------------------------------------
    // Constants
    // -----------------------------------------------------------------------

    pub fn const_int(&mut self, value: i64) -> Value {
        let result = self.func.new_value(Type::Int);
        self.emit(Instr::ConstInt { result, value });
        result
    }

    pub fn const_float(&mut self, value: f64) -> Value {
        let result = self.func.new_value(Type::Float);
        self.emit(Instr::ConstFloat { result, value });
        result
    }

    pub fn const_str(&mut self, value: String) -> Value {
        let result = self.func.new_value(Type::Unknown);
        self.emit(Instr::ConstStr { result, value });
        result
    }

    // -----------------------------------------------------------------------
    // Arithmetic and comparison
    // -----------------------------------------------------------------------

    pub fn binary(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Value {
        let result = self.func.new_value(binary_result_type(lhs.ty, rhs.ty));
        self.emit(Instr::BinOp {
            result,
            op,
            lhs,
            rhs,
        });
        result
    }

    pub fn neg(&mut self, operand: Value) -> Value {
        let result = self.func.new_value(operand.ty);
        self.emit(Instr::Neg { result, operand });
        result
    }

    /// Comparisons yield int 0/1; there is no boolean type.
    pub fn cmp(&mut self, op: CmpOp, lhs: Value, rhs: Value) -> Value {
        let result = self.func.new_value(Type::Int);
        self.emit(Instr::Cmp {
            result,
            op,
            lhs,
            rhs,
        });
        result
    }

    // -----------------------------------------------------------------------
    // Control flow
    // -----------------------------------------------------------------------

    /// Emits a call. A result value is always allocated so the interpreter
    /// can store whatever the callee actually returns; `ret_type` is only
    /// the static annotation.
    pub fn call(&mut self, callee: &str, args: Vec<Value>, ret_type: Type) -> Value {
        let result = self.func.new_value(ret_type);
        self.emit(Instr::Call {
            result,
            callee: callee.to_owned(),
            args,
        });
        result
    }

    pub fn ret(&mut self, value: Option<Value>) {
        self.emit(Instr::Ret { value });
    }

    pub fn br(&mut self, target: BlockId) {
        self.emit(Instr::Br { target });
    }

    pub fn cond_br(&mut self, cond: Value, then_block: BlockId, else_block: BlockId) {
        self.emit(Instr::CondBr {
            cond,
            then_block,
            else_block,
        });
    }

    // -----------------------------------------------------------------------
    // Memory
    // -----------------------------------------------------------------------

    pub fn alloca(&mut self, ty: Type) -> Value {
        let result = self.func.new_value(ty);
        self.emit(Instr::Alloca { result });
        result
    }

    pub fn load(&mut self, ptr: Value) -> Value {
        let result = self.func.new_value(ptr.ty);
        self.emit(Instr::Load { result, ptr });
        result
    }

    pub fn store(&mut self, ptr: Value, value: Value) {
        self.emit(Instr::Store { ptr, value });
    }

    // -----------------------------------------------------------------------
    // Tensor placeholders
    // -----------------------------------------------------------------------

    pub fn tensor_op(&mut self, op: TensorOp, args: Vec<Value>) -> Value {
        let result = self.func.new_value(Type::Tensor);
        self.emit(Instr::TensorOp { result, op, args });
        result
    }
}
