use crate::ir::block::{BasicBlock, BlockId};
use crate::ir::value::Value;
use crate::types::Type;

/// A compiled function in SSA form.
///
/// Blocks are stored contiguously; `BlockId(n)` indexes `blocks[n]` and
/// `blocks[0]` is the entry. Value ids start at 1 (0 is the invalid value)
/// and both counters are strictly monotonic.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub param_types: Vec<Type>,
    pub return_type: Type,
    /// SSA values pre-allocated for the parameters, in declaration order.
    /// Parameters are not materialized by instructions; callers bind their
    /// argument values to these ids when entering the function.
    pub param_values: Vec<Value>,
    pub blocks: Vec<BasicBlock>,
    next_value_id: u32,
    next_block_id: u32,
}

impl Function {
    /// Creates a function and allocates its parameter values (ids `1..=n`).
    pub fn new(name: impl Into<String>, param_types: Vec<Type>, return_type: Type) -> Self {
        let mut func = Self {
            name: name.into(),
            param_types: Vec::new(),
            return_type,
            param_values: Vec::new(),
            blocks: Vec::new(),
            next_value_id: 1,
            next_block_id: 0,
        };
        func.param_values = param_types.iter().map(|&ty| func.alloc_value(ty)).collect();
        func.param_types = param_types;
        func
    }

    fn alloc_value(&mut self, ty: Type) -> Value {
        let value = Value::new(self.next_value_id, ty);
        self.next_value_id += 1;
        value
    }

    /// Allocates a fresh SSA value.
    pub fn new_value(&mut self, ty: Type) -> Value {
        self.alloc_value(ty)
    }

    /// Allocates a new basic block and returns its id. An empty label
    /// defaults to `bb`.
    pub fn new_block(&mut self, label: &str) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;
        let label = if label.is_empty() { "bb" } else { label };
        self.blocks.push(BasicBlock::new(id, label));
        id
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.0 as usize)
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut BasicBlock {
        &mut self.blocks[id.0 as usize]
    }

    /// The entry block (`blocks[0]`), if any block exists.
    pub fn entry_block(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }
}
