use std::io::Write as _;

use super::*;
use crate::index::CompletionKind;
use crate::token::Span;

fn small_table() -> CommandReference {
    CommandReference::from_entries(vec![
        CommandDoc::new("ls", "List objects.\nFlags filter the result."),
        CommandDoc::new("setAttr", "Set an attribute."),
    ])
}

#[test]
fn builtin_table_is_loaded() {
    let reference = CommandReference::builtin();
    assert!(!reference.is_empty());
    for trigger in ["ls", "select", "setAttr", "getAttr", "xform"] {
        assert!(reference.contains(trigger), "missing builtin command: {trigger}");
    }
    assert!(reference.lookup("notACommand").is_none());
}

#[test]
fn parses_wrapped_and_bare_tables() {
    let wrapped = CommandReference::from_json_str(r#"{"completions":[{"trigger":"ls","comment":"List."}]}"#)
        .expect("wrapped table");
    assert_eq!(wrapped.lookup("ls").map(|d| d.documentation.as_str()), Some("List."));

    let bare = CommandReference::from_json_str(r#"[{"trigger":"move"},{"trigger":"scale","comment":"Scale."}]"#)
        .expect("bare table");
    assert_eq!(bare.all_triggers().collect::<Vec<_>>(), vec!["move", "scale"]);
    assert_eq!(bare.lookup("move").map(|d| d.documentation.as_str()), Some(""));
}

#[test]
fn empty_table_reports_not_found() {
    let reference = CommandReference::from_json_str("  ").expect("empty input is allowed");
    assert!(reference.is_empty());
    assert!(reference.lookup("ls").is_none());
    assert!(reference.completion_items().is_empty());
}

#[test]
fn malformed_table_is_an_error() {
    let err = CommandReference::from_json_str("{\"completions\": 5}").unwrap_err();
    assert!(format!("{err:#}").contains("invalid command table"));
}

#[test]
fn later_duplicate_wins_lookup() {
    let reference = CommandReference::from_entries(vec![
        CommandDoc::new("ls", "first"),
        CommandDoc::new("ls", "second"),
    ]);
    assert_eq!(reference.lookup("ls").map(|d| d.documentation.as_str()), Some("second"));
    assert_eq!(reference.all_triggers().count(), 1);
    assert_eq!(reference.completion_items().len(), 2);
    let docs: Vec<&str> = reference.entries().iter().map(|d| d.documentation.as_str()).collect();
    assert_eq!(docs, vec!["first", "second"]);
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"[{{"trigger":"polyCube","comment":"Make a cube."}}]"#).expect("write table");

    let reference = CommandReference::from_path(file.path()).expect("load table");
    assert!(reference.contains("polyCube"));

    let missing = CommandReference::from_path(std::path::Path::new("does/not/exist.json")).unwrap_err();
    assert!(format!("{missing:#}").contains("Failed to read command table"));
}

#[test]
fn completion_items_are_functions() {
    let items = small_table().completion_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind(), CompletionKind::Function);
    assert_eq!(items[0].label(), "ls");
    assert_eq!(items[0].detail(), Some("ls"));
    assert_eq!(items[0].documentation(), Some("List objects.\nFlags filter the result."));
}

#[test]
fn word_at_finds_word_under_cursor() {
    let line = "    string $s[] = `ls -sl`;";
    assert_eq!(word_at(line, 4), Some((4, 10, "string")));
    assert_eq!(word_at(line, 10), Some((4, 10, "string")));
    // `$` and backticks are separators.
    assert_eq!(word_at(line, 12), Some((12, 13, "s")));
    assert_eq!(word_at(line, 20), Some((19, 21, "ls")));
    assert_eq!(word_at(line, 2), None);
    assert_eq!(word_at("", 0), None);
}

#[test]
fn hover_on_known_trigger_links_help() {
    let reference = small_table();
    let info = hover(&reference, 3, "string $s[] = `ls -sl`;", 16, DEFAULT_HELP_URL_BASE).expect("hover for ls");

    let url = "http://help.autodesk.com/cloudhelp/2017/ENU/Maya-Tech-Docs/Commands/ls.html";
    assert_eq!(info.trigger, "ls");
    assert_eq!(info.help_url, url);
    assert!(info.markdown.contains(url));
    assert_eq!(
        info.markdown,
        format!("List objects.  \nFlags filter the result.\n\n[Read Online Help]({url})")
    );
    assert_eq!(info.range, Span::on_line(3, 15, 17));
}

#[test]
fn hover_on_unknown_word_is_none() {
    let reference = small_table();
    assert!(hover(&reference, 0, "myProc();", 2, DEFAULT_HELP_URL_BASE).is_none());
    // Exact match only.
    assert!(hover(&reference, 0, "lsx", 1, DEFAULT_HELP_URL_BASE).is_none());
    assert!(hover(&reference, 0, "   ", 1, DEFAULT_HELP_URL_BASE).is_none());
}

#[test]
fn help_url_joins_base() {
    assert_eq!(help_url("https://docs.example/cmds/", "ls"), "https://docs.example/cmds/ls.html");
    assert_eq!(help_url("https://docs.example/cmds", "ls"), "https://docs.example/cmds/ls.html");
}
