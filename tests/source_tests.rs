//! Tests for the source manager: line-offset tables, offset↔line/col
//! resolution, line extraction, and span algebra.

use zeroc::source::{SourceId, SourceManager, Span};

fn load(src: &str) -> (SourceManager, SourceId) {
    let mut sm = SourceManager::new();
    let id = sm.load_from_string("test.zero", src);
    (sm, id)
}

#[test]
fn test_line_offsets() {
    let (sm, id) = load("abc\ndef\nghi");
    let file = sm.get(id).unwrap();
    assert_eq!(file.line_offsets, vec![0, 4, 8]);
    assert_eq!(file.line_count(), 3);
}

#[test]
fn test_offset_to_line_col() {
    let (sm, id) = load("abc\ndef\n");
    let file = sm.get(id).unwrap();

    assert_eq!(file.offset_to_line_col(0), (1, 1));
    assert_eq!(file.offset_to_line_col(2), (1, 3));
    assert_eq!(file.offset_to_line_col(4), (2, 1));
    assert_eq!(file.offset_to_line_col(6), (2, 3));
}

#[test]
fn test_line_col_round_trip() {
    let (sm, id) = load("fn main() {\n  return 42;\n}\n");
    let file = sm.get(id).unwrap();

    // The start of every line maps back to (line, 1).
    for n in 1..=file.line_count() {
        let offset = file.line_offsets[(n - 1) as usize];
        assert_eq!(file.offset_to_line_col(offset), (n, 1));
    }
}

#[test]
fn test_offset_out_of_range() {
    let (sm, id) = load("abc");
    let file = sm.get(id).unwrap();

    // One past the end is the EOF position and still valid.
    assert_eq!(file.offset_to_line_col(3), (1, 4));
    assert_eq!(file.offset_to_line_col(4), (0, 0));
}

#[test]
fn test_get_line() {
    let (sm, id) = load("first\nsecond\nthird");
    let file = sm.get(id).unwrap();

    assert_eq!(file.get_line(1), "first");
    assert_eq!(file.get_line(2), "second");
    assert_eq!(file.get_line(3), "third");
    assert_eq!(file.get_line(0), "");
    assert_eq!(file.get_line(4), "");
}

#[test]
fn test_get_line_strips_crlf() {
    let (sm, id) = load("first\r\nsecond\r\n");
    let file = sm.get(id).unwrap();

    assert_eq!(file.get_line(1), "first");
    assert_eq!(file.get_line(2), "second");
}

#[test]
fn test_get_text() {
    let (sm, id) = load("let x = 42");
    assert_eq!(sm.get_text(Span::new(id, 4, 5)), "x");
    assert_eq!(sm.get_text(Span::new(id, 8, 10)), "42");

    // Overflow and foreign sources yield empty views.
    assert_eq!(sm.get_text(Span::new(id, 0, 99)), "");
    assert_eq!(sm.get_text(Span::new(SourceId(7), 0, 2)), "");
}

#[test]
fn test_span_contains_and_length() {
    let span = Span::new(SourceId(0), 4, 8);
    assert_eq!(span.len(), 4);
    assert!(span.contains(4));
    assert!(span.contains(7));
    assert!(!span.contains(8));
    assert!(!span.contains(3));
}

#[test]
fn test_span_merge_is_commutative_and_covering() {
    let a = Span::new(SourceId(0), 2, 5);
    let b = Span::new(SourceId(0), 8, 12);

    let ab = a.merge(b);
    let ba = b.merge(a);
    assert_eq!(ab, ba);
    assert_eq!(ab.start, 2);
    assert_eq!(ab.end, 12);
    assert!(ab.contains(3));
    assert!(ab.contains(10));
}

#[test]
fn test_span_merge_across_sources_is_invalid() {
    let a = Span::new(SourceId(0), 0, 4);
    let b = Span::new(SourceId(1), 0, 4);
    assert!(!a.merge(b).is_valid());
}

#[test]
fn test_load_missing_file_returns_invalid() {
    let mut sm = SourceManager::new();
    let id = sm.load("/nonexistent/path/missing.zero");
    assert!(!id.is_valid());
    assert!(sm.get(id).is_none());
}

#[test]
fn test_multiple_files_get_dense_ids() {
    let mut sm = SourceManager::new();
    let a = sm.load_from_string("a.zero", "fn a() {}");
    let b = sm.load_from_string("b.zero", "fn b() {}");
    assert_eq!(a, SourceId(0));
    assert_eq!(b, SourceId(1));
    assert_eq!(sm.file_count(), 2);
    assert_eq!(sm.get_path(a), "a.zero");
    assert_eq!(sm.get_path(b), "b.zero");
}
