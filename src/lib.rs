//! Zero: a small statically-typed procedural language.
//!
//! Compiler pipeline:
//!
//! ```text
//! source (.zero) → Lexer → [Tokens] → Parser → [AST]
//!   → Sema → (validated AST) → Lowering → [IR Module] → Interpreter
//! ```
//!
//! Each stage produces an immutable artifact consumed by the next. The
//! parser and semantic analyzer accumulate their errors and keep going;
//! the driver stops the pipeline after any stage that reported errors.

pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod interp;
pub mod ir;
pub mod lower;
pub mod parser;
pub mod sema;
pub mod source;
pub mod types;

pub use error::Error;

use crate::parser::Parser;
use crate::sema::Sema;
use crate::source::{SourceId, SourceManager};

/// External function names the driver registers with the interpreter.
/// The semantic analyzer treats these as known, variadic callees.
pub const EXTERNAL_FNS: &[&str] = &["print"];

/// Compiles a loaded source through lex → parse → sema → lowering.
///
/// Returns the IR module, or every diagnostic the failing stage collected.
pub fn compile(sm: &SourceManager, id: SourceId) -> Result<ir::Module, Vec<Error>> {
    let file = sm.get(id).ok_or_else(|| vec![Error::SourceNotFound])?;

    let mut parser = Parser::new(file, id);
    let program = parser.parse();
    if parser.had_error() {
        return Err(parser
            .errors()
            .iter()
            .cloned()
            .map(Error::Syntax)
            .collect());
    }
    log::debug!("parsed {} function(s)", program.functions.len());

    let mut sema = Sema::new();
    for name in EXTERNAL_FNS {
        sema.declare_external(name);
    }
    sema.analyze(&program);
    if sema.had_error() {
        return Err(sema.errors().iter().cloned().map(Error::Sema).collect());
    }

    Ok(lower::lower(&program))
}

/// Compiles Zero source from an in-memory string. Convenience for tests
/// and embedding.
pub fn compile_source(source: &str) -> Result<ir::Module, Vec<Error>> {
    let mut sm = SourceManager::new();
    let id = sm.load_from_string("<memory>", source);
    compile(&sm, id)
}
