use super::*;

// =============================================================
// Recognized lines
// =============================================================

#[test]
fn parses_single_set() {
    assert_eq!(
        parse_whiteboard_diff("SET cell1 hello"),
        vec![Operation::set("cell1", "hello")]
    );
}

#[test]
fn set_value_runs_to_end_of_line() {
    assert_eq!(
        parse_whiteboard_diff("SET title   Weekly sync: agenda & notes  "),
        vec![Operation::set("title", "Weekly sync: agenda & notes")]
    );
}

#[test]
fn set_without_value_sets_empty_string() {
    assert_eq!(parse_whiteboard_diff("SET a"), vec![Operation::set("a", "")]);
}

#[test]
fn parses_mixed_operations_in_order() {
    let ops = parse_whiteboard_diff("CLEAR\nSET x 9\nDELETE y\nSET z last");
    assert_eq!(
        ops,
        vec![
            Operation::Clear,
            Operation::set("x", "9"),
            Operation::delete("y"),
            Operation::set("z", "last"),
        ]
    );
}

#[test]
fn keywords_are_case_insensitive_inside_body() {
    let ops = parse_whiteboard_diff("[whiteboard:diff]\nset a 1\nDelete b\nclear");
    assert_eq!(
        ops,
        vec![Operation::set("a", "1"), Operation::delete("b"), Operation::Clear]
    );
}

#[test]
fn value_escapes_are_decoded() {
    assert_eq!(
        parse_whiteboard_diff(r"SET notes line one\nline two \\ done \t"),
        vec![Operation::set("notes", "line one\nline two \\ done \\t")]
    );
}

#[test]
fn trailing_backslash_is_kept() {
    assert_eq!(
        parse_whiteboard_diff(r"SET path C:\"),
        vec![Operation::set("path", "C:\\")]
    );
}

#[test]
fn envelope_is_stripped_before_parsing() {
    let content = "```whiteboard\nSET a 1\n```\nSET ignored after fence";
    assert_eq!(parse_whiteboard_diff(content), vec![Operation::set("a", "1")]);
}

// =============================================================
// Skipped lines
// =============================================================

#[test]
fn corrupt_line_does_not_abort_rest() {
    let ops = parse_whiteboard_diff("SET a 1\n%%% corrupt %%%\nSET b 2");
    assert_eq!(ops, vec![Operation::set("a", "1"), Operation::set("b", "2")]);
}

#[test]
fn all_unrecognized_yields_empty() {
    assert!(parse_whiteboard_diff("[whiteboard:diff]\nnotacommand\n").is_empty());
}

#[test]
fn empty_input_yields_empty() {
    assert!(parse_whiteboard_diff("").is_empty());
    assert!(parse_whiteboard_diff("[whiteboard:diff]\n").is_empty());
}

#[test]
fn malformed_keyword_lines_are_skipped() {
    let ops = parse_whiteboard_diff("SET\nDELETE\nDELETE a b\nCLEAR now\nSET ok yes");
    assert_eq!(ops, vec![Operation::set("ok", "yes")]);
}

// =============================================================
// parse_lines diagnostics
// =============================================================

#[test]
fn parse_lines_reports_reasons_with_line_numbers() {
    let lines = parse_lines("SET a 1\n\n# note\nbogus x\nDELETE a b\nSET");
    let outcomes: Vec<(usize, Result<Operation, LineError>)> = lines
        .into_iter()
        .map(|l| (l.line_no, l.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (1, Ok(Operation::set("a", "1"))),
            (2, Err(LineError::Blank)),
            (3, Err(LineError::Comment)),
            (4, Err(LineError::UnknownKeyword("bogus".to_owned()))),
            (
                5,
                Err(LineError::TrailingText {
                    keyword: "DELETE",
                    trailing: "b".to_owned(),
                })
            ),
            (6, Err(LineError::MissingKey("SET"))),
        ]
    );
}

#[test]
fn filler_classification() {
    assert!(LineError::Blank.is_filler());
    assert!(LineError::Comment.is_filler());
    assert!(!LineError::UnknownKeyword("x".to_owned()).is_filler());
}

#[test]
fn line_error_messages_are_readable() {
    assert_eq!(
        LineError::UnknownKeyword("MOVE".to_owned()).to_string(),
        "unknown keyword `MOVE`"
    );
    assert_eq!(LineError::MissingKey("DELETE").to_string(), "DELETE requires a key");
}

// =============================================================
// Inspection reports
// =============================================================

#[test]
fn inspect_diff_splits_operations_and_mistakes() {
    let report = inspect("[whiteboard:diff]\nSET a 1\n\n# note\nbogus\nCLEAR");
    assert_eq!(report.format, "diff");
    assert_eq!(report.operations, vec![Operation::set("a", "1"), Operation::Clear]);
    assert_eq!(
        report.skipped,
        vec![SkippedLine { line: 4, reason: "unknown keyword `bogus`".to_owned() }]
    );
}

#[test]
fn inspect_legacy_reports_nothing() {
    let report = inspect("a = 1\nb = 2");
    assert_eq!(report.format, "legacy");
    assert!(report.operations.is_empty());
    assert!(report.skipped.is_empty());
}
