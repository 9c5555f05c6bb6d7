//! Tests for CLI argument parsing.

use zeroc::cli::{help_text, parse_args, version_text, ParseArgsResult};

fn args(list: &[&str]) -> Vec<String> {
    std::iter::once("zeroc")
        .chain(list.iter().copied())
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_no_arguments_shows_help() {
    assert!(matches!(
        parse_args(&args(&[])),
        Ok(ParseArgsResult::Help)
    ));
}

#[test]
fn test_help_flags() {
    assert!(matches!(
        parse_args(&args(&["--help"])),
        Ok(ParseArgsResult::Help)
    ));
    assert!(matches!(
        parse_args(&args(&["-h"])),
        Ok(ParseArgsResult::Help)
    ));
}

#[test]
fn test_version_flags() {
    assert!(matches!(
        parse_args(&args(&["--version"])),
        Ok(ParseArgsResult::Version)
    ));
    assert!(matches!(
        parse_args(&args(&["-v"])),
        Ok(ParseArgsResult::Version)
    ));
}

#[test]
fn test_plain_file() {
    match parse_args(&args(&["demo.zero"])) {
        Ok(ParseArgsResult::Args(cli)) => {
            assert_eq!(cli.path.to_str(), Some("demo.zero"));
            assert!(!cli.dump_ir);
            assert!(!cli.dump_ast);
        }
        other => panic!("expected args, got {:?}", other),
    }
}

#[test]
fn test_dump_ir_flag() {
    match parse_args(&args(&["--dump-ir", "demo.zero"])) {
        Ok(ParseArgsResult::Args(cli)) => {
            assert!(cli.dump_ir);
            assert_eq!(cli.path.to_str(), Some("demo.zero"));
        }
        other => panic!("expected args, got {:?}", other),
    }
}

#[test]
fn test_flag_order_does_not_matter() {
    match parse_args(&args(&["demo.zero", "--dump-ir"])) {
        Ok(ParseArgsResult::Args(cli)) => assert!(cli.dump_ir),
        other => panic!("expected args, got {:?}", other),
    }
}

#[test]
fn test_unknown_option_is_rejected() {
    let err = parse_args(&args(&["--frobnicate", "demo.zero"])).unwrap_err();
    assert!(err.contains("--frobnicate"));
}

#[test]
fn test_missing_file_is_rejected() {
    let err = parse_args(&args(&["--dump-ir"])).unwrap_err();
    assert!(err.contains("No input file"));
}

#[test]
fn test_help_text_mentions_flags() {
    let help = help_text();
    assert!(help.contains("--dump-ir"));
    assert!(help.contains("--version"));
    assert!(version_text().starts_with("zeroc "));
}
