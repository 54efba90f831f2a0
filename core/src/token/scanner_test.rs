use super::{Position, Span, scan_line, utf16_len};

fn texts(line: &str) -> Vec<&str> {
    scan_line(line).into_iter().map(|t| t.text).collect()
}

#[test]
fn splits_on_any_whitespace_run() {
    assert_eq!(texts("proc  string\tmyFn() {"), vec!["proc", "string", "myFn()", "{"]);
    assert_eq!(texts("   $x = 1;   "), vec!["$x", "=", "1;"]);
}

#[test]
fn empty_and_blank_lines_have_no_tokens() {
    assert!(scan_line("").is_empty());
    assert!(scan_line(" \t  ").is_empty());
}

#[test]
fn columns_point_at_token_start() {
    let tokens = scan_line("  proc foo() {");
    assert_eq!(tokens[0].column, 2);
    assert_eq!(tokens[1].column, 7);
    assert_eq!(tokens[1].end_column(), 12);
    assert_eq!(tokens[2].column, 13);
}

#[test]
fn columns_count_utf16_units() {
    // U+1F600 takes two UTF-16 units, 'é' takes one.
    let tokens = scan_line("\u{1F600} é $v=1");
    assert_eq!(tokens[1].column, 3);
    assert_eq!(tokens[2].column, 5);
    assert_eq!(utf16_len("\u{1F600}"), 2);
}

#[test]
fn trailing_carriage_return_is_whitespace() {
    assert_eq!(texts("}\r"), vec!["}"]);
}

#[test]
fn brace_detection_matches_substrings() {
    let tokens = scan_line("{ }else{ x");
    assert!(tokens[0].opens_block());
    assert!(tokens[1].opens_block() && tokens[1].closes_block());
    assert!(!tokens[2].opens_block() && !tokens[2].closes_block());
}

#[test]
fn span_containment_is_inclusive() {
    let outer = Span::new(Position::new(1, 0), Position::new(4, 1));
    assert!(outer.contains(&Span::on_line(2, 4, 6)));
    assert!(outer.contains(&outer));
    assert!(!outer.contains(&Span::on_line(4, 0, 3)));
    assert_eq!(outer.line_count(), 4);
}
