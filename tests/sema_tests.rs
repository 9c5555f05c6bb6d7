//! Tests for semantic analysis: the error taxonomy, scoping, numeric
//! promotion, and lenient return checking.

use zeroc::error::SemaErrorKind;
use zeroc::parser::Parser;
use zeroc::sema::Sema;
use zeroc::source::SourceManager;
use zeroc::types::Type;

fn analyze(src: &str) -> Vec<SemaErrorKind> {
    analyze_with(src, &[])
}

fn analyze_with(src: &str, externals: &[&str]) -> Vec<SemaErrorKind> {
    let mut sm = SourceManager::new();
    let id = sm.load_from_string("test.zero", src);
    let file = sm.get(id).unwrap();
    let mut parser = Parser::new(file, id);
    let program = parser.parse();
    assert!(
        !parser.had_error(),
        "unexpected parse errors: {:?}",
        parser.errors()
    );

    let mut sema = Sema::new();
    for name in externals {
        sema.declare_external(name);
    }
    sema.analyze(&program);
    sema.errors().iter().map(|e| e.kind).collect()
}

#[test]
fn test_valid_program_has_no_errors() {
    let errors = analyze("fn add(a: int, b: int) -> int { return a + b; }");
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_undefined_variable() {
    let errors = analyze("fn main() { return y; }");
    assert_eq!(errors, vec![SemaErrorKind::UndefinedVariable]);
}

#[test]
fn test_undefined_function() {
    let errors = analyze("fn main() { return missing(); }");
    assert_eq!(errors, vec![SemaErrorKind::UndefinedFunction]);
}

#[test]
fn test_wrong_arg_count() {
    let errors = analyze("fn f(a: int) -> int { return a; } fn main() { f(1, 2); }");
    assert_eq!(errors, vec![SemaErrorKind::WrongArgCount]);
}

#[test]
fn test_argument_type_mismatch() {
    let errors = analyze("fn f(a: int) -> int { return a; } fn main() { f(1.5); }");
    assert_eq!(errors, vec![SemaErrorKind::TypeMismatch]);
}

#[test]
fn test_let_annotation_mismatch() {
    let errors = analyze("fn main() { let x: int = 1.5; }");
    assert_eq!(errors, vec![SemaErrorKind::TypeMismatch]);
}

#[test]
fn test_return_type_mismatch() {
    let errors = analyze("fn f() -> int { return 1.5; }");
    assert_eq!(errors, vec![SemaErrorKind::ReturnTypeMismatch]);
}

#[test]
fn test_void_return_mismatch() {
    // A bare `return` in an int function is a mismatch.
    let errors = analyze("fn f() -> int { return; }");
    assert_eq!(errors, vec![SemaErrorKind::ReturnTypeMismatch]);
}

#[test]
fn test_duplicate_variable_in_scope() {
    let errors = analyze("fn main() { let x = 1; let x = 2; }");
    assert_eq!(errors, vec![SemaErrorKind::DuplicateDefinition]);
}

#[test]
fn test_duplicate_function() {
    let errors = analyze("fn f() {}\nfn f() {}");
    assert_eq!(errors, vec![SemaErrorKind::DuplicateDefinition]);
}

#[test]
fn test_shadowing_in_inner_scope_is_allowed() {
    let errors = analyze("fn main() { let x = 1; if x { let x = 2; } }");
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_branch_local_is_invisible_after_if() {
    let errors = analyze("fn main() { if 1 { let x = 5; } return x; }");
    assert_eq!(errors, vec![SemaErrorKind::UndefinedVariable]);
}

#[test]
fn test_while_body_has_own_scope() {
    let errors = analyze("fn main() { while 0 { let t = 1; } return t; }");
    assert_eq!(errors, vec![SemaErrorKind::UndefinedVariable]);
}

#[test]
fn test_numeric_promotion_in_return() {
    let errors = analyze("fn f() -> float { return 1 + 2.0; }");
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_unannotated_function_checks_leniently() {
    // No declared return type: any return value is accepted.
    let errors = analyze("fn f() { return 42; }");
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_unannotated_params_are_compatible() {
    let errors =
        analyze("fn foo(a, b) { return a + b; } fn main() { return foo(3, 4); }");
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_inferred_let_type_flows() {
    let errors = analyze("fn f() -> int { let x = 1; return x; }");
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);

    let errors = analyze("fn f() -> int { let x = 1.5; return x; }");
    assert_eq!(errors, vec![SemaErrorKind::ReturnTypeMismatch]);
}

#[test]
fn test_analysis_collects_all_errors() {
    let errors = analyze("fn main() { return a + b; }");
    assert_eq!(
        errors,
        vec![
            SemaErrorKind::UndefinedVariable,
            SemaErrorKind::UndefinedVariable
        ]
    );
}

#[test]
fn test_external_functions_are_variadic() {
    let errors = analyze_with("fn main() { print(1, 2, 3); print(); }", &["print"]);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_call_yields_signature_return_type() {
    // `g` returns float; assigning it to an int-annotated let is a mismatch.
    let errors = analyze(
        "fn g() -> float { return 1.0; } fn main() { let x: int = g(); }",
    );
    assert_eq!(errors, vec![SemaErrorKind::TypeMismatch]);
}

#[test]
fn test_signature_lookup() {
    let mut sm = SourceManager::new();
    let id = sm.load_from_string("test.zero", "fn f(a: int) -> float { return 1.0; }");
    let file = sm.get(id).unwrap();
    let mut parser = Parser::new(file, id);
    let program = parser.parse();

    let mut sema = Sema::new();
    sema.analyze(&program);

    let sig = sema.signature("f").expect("signature collected");
    assert_eq!(sig.param_types, vec![Type::Int]);
    assert_eq!(sig.return_type, Type::Float);
    assert!(sema.signature("g").is_none());
}
