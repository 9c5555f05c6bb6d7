//! Tests for the recursive-descent parser: precedence, statement forms,
//! span merging, and panic-mode error recovery.

use zeroc::parser::ast::{BinOp, Expr, Program, Stmt};
use zeroc::parser::Parser;
use zeroc::source::SourceManager;
use zeroc::types::Type;

fn parse(src: &str) -> (Program, Vec<String>) {
    let mut sm = SourceManager::new();
    let id = sm.load_from_string("test.zero", src);
    let file = sm.get(id).unwrap();
    let mut parser = Parser::new(file, id);
    let program = parser.parse();
    let errors = parser
        .errors()
        .iter()
        .map(|e| e.message.clone())
        .collect();
    (program, errors)
}

fn parse_ok(src: &str) -> Program {
    let (program, errors) = parse(src);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    program
}

/// The expression of the first statement of the first function.
fn first_expr(program: &Program) -> &Expr {
    match &program.functions[0].body[0] {
        Stmt::Return { value: Some(e), .. } => e.as_ref(),
        Stmt::Expr { expr, .. } => expr.as_ref(),
        Stmt::Let { init, .. } => init.as_ref(),
        other => panic!("unexpected first statement: {:?}", other),
    }
}

#[test]
fn test_precedence_mul_binds_tighter() {
    let program = parse_ok("fn main() { return 1 + 2 * 3; }");
    // `1 + (2 * 3)`: the root is `+` with a `*` on the right.
    match first_expr(&program) {
        Expr::Binary { op: BinOp::Add, rhs, .. } => match rhs.as_ref() {
            Expr::Binary { op: BinOp::Mul, .. } => {}
            other => panic!("expected mul on rhs, got {:?}", other),
        },
        other => panic!("expected add at root, got {:?}", other),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    let program = parse_ok("fn main() { return (1 + 2) * 3; }");
    // `(1 + 2) * 3`: the root is `*` with a grouped `+` on the left.
    match first_expr(&program) {
        Expr::Binary { op: BinOp::Mul, lhs, .. } => match lhs.as_ref() {
            Expr::Group { inner, .. } => match inner.as_ref() {
                Expr::Binary { op: BinOp::Add, .. } => {}
                other => panic!("expected add inside group, got {:?}", other),
            },
            other => panic!("expected group on lhs, got {:?}", other),
        },
        other => panic!("expected mul at root, got {:?}", other),
    }
}

#[test]
fn test_comparison_below_additive() {
    let program = parse_ok("fn main() { return 1 + 2 < 3; }");
    match first_expr(&program) {
        Expr::Binary { op: BinOp::Lt, .. } => {}
        other => panic!("expected comparison at root, got {:?}", other),
    }
}

#[test]
fn test_unary_right_associative() {
    let program = parse_ok("fn main() { return --5; }");
    match first_expr(&program) {
        Expr::Unary { operand, .. } => {
            assert!(matches!(operand.as_ref(), Expr::Unary { .. }));
        }
        other => panic!("expected nested unary, got {:?}", other),
    }
}

#[test]
fn test_fn_decl_shape() {
    let program = parse_ok("fn add(a: int, b: int) -> int { return a + b; }");
    let fn_decl = &program.functions[0];
    assert_eq!(fn_decl.name, "add");
    assert_eq!(fn_decl.params.len(), 2);
    assert_eq!(fn_decl.params[0].name, "a");
    assert_eq!(fn_decl.params[0].ty, Type::Int);
    assert_eq!(fn_decl.return_type.unwrap().ty, Type::Int);
    assert_eq!(fn_decl.body.len(), 1);
}

#[test]
fn test_params_without_annotations() {
    let program = parse_ok("fn foo(a, b) { return a; }");
    let params = &program.functions[0].params;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].ty, Type::Unknown);
    assert_eq!(params[1].ty, Type::Unknown);
}

#[test]
fn test_let_with_annotation() {
    let program = parse_ok("fn main() { let x: float = 1.5; }");
    match &program.functions[0].body[0] {
        Stmt::Let { name, annot, .. } => {
            assert_eq!(name, "x");
            assert_eq!(annot.unwrap().ty, Type::Float);
        }
        other => panic!("expected let, got {:?}", other),
    }
}

#[test]
fn test_unknown_type_name_maps_to_unknown() {
    let program = parse_ok("fn main() { let x: widget = 1; }");
    match &program.functions[0].body[0] {
        Stmt::Let { annot, .. } => assert_eq!(annot.unwrap().ty, Type::Unknown),
        other => panic!("expected let, got {:?}", other),
    }
}

#[test]
fn test_semicolons_are_optional() {
    let program = parse_ok("fn main() {\n  let x = 1\n  return x\n}");
    assert_eq!(program.functions[0].body.len(), 2);
}

#[test]
fn test_return_without_value() {
    let program = parse_ok("fn main() { return; }");
    match &program.functions[0].body[0] {
        Stmt::Return { value: None, .. } => {}
        other => panic!("expected bare return, got {:?}", other),
    }
}

#[test]
fn test_call_args() {
    let program = parse_ok("fn main() { foo(1, 2, 3); }");
    match first_expr(&program) {
        Expr::Call { callee, args, .. } => {
            assert_eq!(callee, "foo");
            assert_eq!(args.len(), 3);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_keyword_arguments_discard_labels() {
    // `units = 64` parses as the positional argument `64`.
    let program = parse_ok("fn main() { foo(units = 64, 7); }");
    match first_expr(&program) {
        Expr::Call { args, .. } => {
            assert_eq!(args.len(), 2);
            assert!(matches!(args[0], Expr::IntLit { value: 64, .. }));
            assert!(matches!(args[1], Expr::IntLit { value: 7, .. }));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_if_else_and_while() {
    let program = parse_ok(
        "fn main() {\n  if x < 10 {\n    return 1;\n  } else {\n    return 2;\n  }\n  while 1 {\n    foo();\n  }\n}",
    );
    let body = &program.functions[0].body;
    assert!(matches!(body[0], Stmt::If { .. }));
    assert!(matches!(body[1], Stmt::While { .. }));

    match &body[0] {
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(then_branch.len(), 1);
            assert_eq!(else_branch.len(), 1);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_nested_block() {
    let program = parse_ok("fn main() { { let x = 1; } }");
    match &program.functions[0].body[0] {
        Stmt::Block { stmts, .. } => assert_eq!(stmts.len(), 1),
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_use_decl_is_skipped() {
    let program = parse_ok("use tensor\nfn main() { return 0; }");
    assert_eq!(program.functions.len(), 1);
}

#[test]
fn test_string_literal_strips_quotes() {
    let program = parse_ok("fn main() { let s = \"hi\"; }");
    match first_expr(&program) {
        Expr::StrLit { value, .. } => assert_eq!(value, "hi"),
        other => panic!("expected string literal, got {:?}", other),
    }
}

#[test]
fn test_fn_span_covers_declaration() {
    let src = "fn main() { return 0; }";
    let program = parse_ok(src);
    let span = program.functions[0].span;
    assert_eq!(span.start, 0);
    assert_eq!(span.end, src.len() as u32);
}

#[test]
fn test_binary_span_merges_operands() {
    let src = "fn main() { return 10 + 200; }";
    let program = parse_ok(src);
    let span = first_expr(&program).span();
    assert_eq!(span.start, src.find("10").unwrap() as u32);
    assert_eq!(span.end, (src.find("200").unwrap() + 3) as u32);
}

#[test]
fn test_error_recovery_reports_multiple_errors() {
    let (program, errors) = parse("fn main() {\n  let = 1;\n  let y 2;\n  return 0;\n}");
    // Both bad statements are reported, and parsing still recovers the
    // surrounding function.
    assert!(errors.len() >= 2, "expected >= 2 errors, got {:?}", errors);
    assert_eq!(program.functions.len(), 1);
}

#[test]
fn test_stray_top_level_token_recovers_to_next_fn() {
    let (program, errors) = parse("42\nfn main() { return 0; }");
    assert!(!errors.is_empty());
    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.functions[0].name, "main");
}

#[test]
fn test_lex_errors_flow_through_parser() {
    let (_, errors) = parse("fn main() { let x = @; }");
    assert!(errors.iter().any(|m| m.contains("Unexpected character")));
}

#[test]
fn test_recovery_terminates_on_stray_tokens() {
    // Tokens no production consumes must not wedge the parser.
    let (_, errors) = parse(";;");
    assert!(!errors.is_empty());

    let (program, errors) = parse("fn main() { foo(1;) }\nfn after() { return 1; }");
    assert!(!errors.is_empty());
    assert!(program.functions.iter().any(|f| f.name == "after"));
}

#[test]
fn test_multiple_functions_in_order() {
    let program = parse_ok("fn a() {}\nfn b() {}\nfn c() {}");
    let names: Vec<_> = program.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}
