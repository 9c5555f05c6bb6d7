//! Tests for the diagnostic renderer.

use zeroc::diagnostics::render_error;
use zeroc::error::{Error, InterpError};
use zeroc::source::SourceManager;

#[test]
fn test_renders_excerpt_with_caret() {
    let src = "fn main() {\n    return y;\n}\n";
    let mut sm = SourceManager::new();
    let id = sm.load_from_string("demo.zero", src);

    let errors = zeroc::compile(&sm, id).err().expect("sema error expected");
    let rendered = render_error(&sm, &errors[0]);

    assert!(rendered.starts_with("error: Undefined variable: y\n"));
    assert!(rendered.contains(" --> demo.zero:2:12\n"));
    assert!(rendered.contains("2 |     return y;\n"));

    // The caret lands in the same column as the offending identifier.
    let lines: Vec<&str> = rendered.lines().collect();
    let source_row = lines[lines.len() - 2];
    let caret_row = lines[lines.len() - 1];
    assert_eq!(caret_row.find('^'), source_row.find('y'));
}

#[test]
fn test_spanless_error_renders_message_only() {
    let sm = SourceManager::new();
    let err = Error::Interp(InterpError::EntryNotFound {
        name: "main".into(),
    });
    assert_eq!(
        render_error(&sm, &err),
        "error: entry function not found: main\n"
    );
}

#[test]
fn test_every_stage_error_is_prefixed() {
    let mut sm = SourceManager::new();
    let id = sm.load_from_string("demo.zero", "fn main() { let = 1; }");
    let errors = zeroc::compile(&sm, id).err().expect("parse error expected");
    for err in &errors {
        assert!(render_error(&sm, err).starts_with("error: "));
    }
}
