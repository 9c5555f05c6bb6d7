use std::fmt;

use crate::ir::instr::Instr;

/// An opaque index identifying a basic block within a `Function`.
/// `BlockId(n)` always indexes `blocks[n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// A basic block: a straight-line instruction sequence.
///
/// A well-formed block has at most one terminator (`Ret`, `Br`, `CondBr`)
/// and, if present, it is the final instruction. Lowering may leave trailing
/// blocks unterminated; the interpreter falls through to the next block in
/// that case.
#[derive(Debug)]
pub struct BasicBlock {
    pub id: BlockId,
    pub label: String,
    pub instrs: Vec<Instr>,
}

impl BasicBlock {
    pub fn new(id: BlockId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            instrs: Vec::new(),
        }
    }

    pub fn push(&mut self, instr: Instr) {
        self.instrs.push(instr);
    }

    /// The terminator instruction, if the block ends with one.
    pub fn terminator(&self) -> Option<&Instr> {
        self.instrs.last().filter(|i| i.is_terminator())
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator().is_some()
    }
}
