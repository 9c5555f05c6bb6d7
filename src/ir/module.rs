use crate::ir::function::Function;

/// The top-level IR container: an ordered list of functions.
///
/// Duplicate function names are prevented upstream by semantic analysis,
/// so lookup is a plain linear scan over the (small) function list.
#[derive(Debug, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, func: Function) {
        self.functions.push(func);
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}
