use super::*;

// =============================================================
// Diff forms
// =============================================================

#[test]
fn bare_set_is_diff() {
    assert_eq!(
        classify("SET cell1 hello"),
        ContentFormat::Diff {
            body: "SET cell1 hello"
        }
    );
}

#[test]
fn bare_delete_and_clear_are_diff() {
    assert!(is_whiteboard_diff("DELETE a"));
    assert!(is_whiteboard_diff("CLEAR\nSET x 9"));
}

#[test]
fn leading_blank_lines_are_ignored() {
    assert!(is_whiteboard_diff("\n\n   \nSET a 1"));
}

#[test]
fn header_form_strips_header() {
    let format = classify("[whiteboard:diff]\nSET a 1\nDELETE b\n");
    assert_eq!(format.body(), Some("SET a 1\nDELETE b\n"));
}

#[test]
fn header_is_case_insensitive() {
    assert!(is_whiteboard_diff("[WHITEBOARD:DIFF]\nnotacommand\n"));
}

#[test]
fn header_with_unparseable_body_is_still_diff() {
    assert_eq!(
        classify("[whiteboard:diff]\nnotacommand\n"),
        ContentFormat::Diff {
            body: "notacommand\n"
        }
    );
}

#[test]
fn fenced_form_extracts_inner_block() {
    let content = "```whiteboard\nSET a 1\n```\ntrailing prose";
    assert_eq!(classify(content).body(), Some("SET a 1\n"));
}

#[test]
fn fenced_form_accepts_diff_tag() {
    assert!(is_whiteboard_diff("```whiteboard-diff\nCLEAR\n```"));
}

#[test]
fn unclosed_fence_takes_remaining_content() {
    assert_eq!(
        classify("```whiteboard\nSET a 1\nSET b 2").body(),
        Some("SET a 1\nSET b 2")
    );
}

// =============================================================
// Legacy
// =============================================================

#[test]
fn empty_and_blank_content_is_legacy() {
    assert_eq!(classify(""), ContentFormat::Legacy);
    assert_eq!(classify("  \n \t"), ContentFormat::Legacy);
}

#[test]
fn prose_is_legacy() {
    assert!(!is_whiteboard_diff("garbage not a diff at all"));
}

#[test]
fn lower_case_bare_keyword_is_legacy() {
    assert!(!is_whiteboard_diff("Set up the agenda for tomorrow"));
    assert!(!is_whiteboard_diff("set a 1"));
}

#[test]
fn keyword_prefix_without_separator_is_legacy() {
    assert!(!is_whiteboard_diff("SETTINGS changed"));
    assert!(!is_whiteboard_diff("CLEARLY not"));
    assert!(!is_whiteboard_diff("SET"));
}

#[test]
fn other_fences_are_legacy() {
    assert!(!is_whiteboard_diff("```rust\nfn main() {}\n```"));
}

#[test]
fn diff_keyword_after_prose_is_legacy() {
    assert!(!is_whiteboard_diff("Here is the board:\nSET a 1"));
}

// =============================================================
// diff_body
// =============================================================

#[test]
fn diff_body_passes_through_unclassified_text() {
    assert_eq!(diff_body("notacommand"), "notacommand");
    assert_eq!(diff_body("[whiteboard:diff]\nSET a 1"), "SET a 1");
}
