// Rewrite Buffer Tests
//
// Offset mapping, nested containment, and conflict rejection.

use crate::rewrite::{RewriteBuffer, RewriteError};

#[test]
fn test_untouched_buffer_round_trips() {
    let buf = RewriteBuffer::new("int x = 1;");
    assert!(!buf.has_changes());
    assert_eq!(buf.as_str(), "int x = 1;");
    assert_eq!(buf.text_for(&(4..5)).unwrap(), "x");
}

#[test]
fn test_single_replacement() {
    let mut buf = RewriteBuffer::new("return arr[5];");
    buf.replace(7..13, "WRAPPED").unwrap();
    assert_eq!(buf.as_str(), "return WRAPPED;");
    assert!(buf.has_changes());
}

#[test]
fn test_replacement_shifts_later_offsets() {
    let mut buf = RewriteBuffer::new("a[0]; b[1];");
    buf.replace(0..4, "first(a, 0)").unwrap();
    // The second span is addressed in original coordinates
    buf.replace(6..10, "second(b, 1)").unwrap();
    assert_eq!(buf.as_str(), "first(a, 0); second(b, 1);");
}

#[test]
fn test_text_for_sees_contained_edits() {
    // arr[indices[2]]: after the inner rewrite, the outer operand span
    // must yield the rewritten text
    let source = "arr[indices[2]]";
    let mut buf = RewriteBuffer::new(source);
    buf.replace(4..14, "inner(indices, 2)").unwrap();
    assert_eq!(buf.text_for(&(4..14)).unwrap(), "inner(indices, 2)");
    assert_eq!(buf.as_str(), "arr[inner(indices, 2)]");
}

#[test]
fn test_outer_replacement_contains_inner_edit() {
    let source = "arr[indices[2]]";
    let mut buf = RewriteBuffer::new(source);
    buf.replace(4..14, "inner(indices, 2)").unwrap();
    buf.replace(0..15, "outer(arr, inner(indices, 2))").unwrap();
    assert_eq!(buf.as_str(), "outer(arr, inner(indices, 2))");
}

#[test]
fn test_partial_overlap_is_conflict() {
    let mut buf = RewriteBuffer::new("abcdefghij");
    buf.replace(2..6, "XX").unwrap();
    let err = buf.replace(4..8, "YY").unwrap_err();
    assert!(matches!(err, RewriteError::Conflict { .. }));
    // Failed edit left the buffer untouched
    assert_eq!(buf.as_str(), "abXXghij");
}

#[test]
fn test_offset_inside_edit_is_unmappable() {
    let mut buf = RewriteBuffer::new("abcdefghij");
    buf.replace(2..6, "XX").unwrap();
    assert!(buf.text_for(&(3..8)).is_none());
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut buf = RewriteBuffer::new("short");
    let err = buf.replace(3..99, "nope").unwrap_err();
    assert!(matches!(err, RewriteError::OutOfBounds { .. }));
    assert_eq!(buf.as_str(), "short");
}

#[test]
fn test_insert_before_start() {
    let mut buf = RewriteBuffer::new("int x;\n");
    buf.replace(4..5, "y").unwrap();
    buf.insert_before(0, "#include \"prelude.hpp\"\n").unwrap();
    assert_eq!(buf.as_str(), "#include \"prelude.hpp\"\nint y;\n");
}

#[test]
fn test_adjacent_edits_do_not_conflict() {
    let mut buf = RewriteBuffer::new("abcdef");
    buf.replace(0..3, "X").unwrap();
    buf.replace(3..6, "Y").unwrap();
    assert_eq!(buf.as_str(), "XY");
}

#[test]
fn test_empty_replacement_deletes() {
    let mut buf = RewriteBuffer::new("keep drop keep");
    buf.replace(4..9, "").unwrap();
    assert_eq!(buf.as_str(), "keep keep");
}
