pub mod block;
pub mod builder;
pub mod function;
pub mod instr;
pub mod module;
pub mod printer;
pub mod value;

pub use block::{BasicBlock, BlockId};
pub use builder::Builder;
pub use function::Function;
pub use instr::{BinOp, CmpOp, Instr, TensorOp};
pub use module::Module;
pub use value::Value;
