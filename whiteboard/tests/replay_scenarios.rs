//! End-to-end replays of small chat histories through the public API.

use whiteboard::{
    EMPTY_WHITEBOARD, Message, MessageId, Operation, ReplayConfig, WhiteboardState, apply_diff,
    compute_final_state, compute_message_snapshots, is_whiteboard_diff, parse_whiteboard_diff,
    render_whiteboard,
};

const WB: &str = "화이트보드";

fn wb(id: i64, content: &str) -> Message {
    Message::new(id, WB, content)
}

fn state(pairs: &[(&str, &str)]) -> WhiteboardState {
    pairs.iter().copied().collect()
}

fn rendered(messages: &[Message], id: i64) -> String {
    compute_message_snapshots(messages, &ReplayConfig::default())
        .get(&MessageId::from(id))
        .map(|info| info.rendered_content.clone())
        .unwrap_or_default()
}

#[test]
fn single_set_renders_cell() {
    let messages = vec![wb(1, "SET cell1 hello")];
    let snapshots = compute_message_snapshots(&messages, &ReplayConfig::default());
    let info = snapshots.get(&MessageId::from(1)).expect("snapshot for message 1");
    assert_eq!(info.rendered_content, "cell1 = hello");
    assert!(info.is_whiteboard_message);
}

#[test]
fn delete_removes_cell_from_later_snapshots() {
    let messages = vec![wb(1, "SET a 1"), wb(2, "SET b 2"), wb(3, "DELETE a")];
    assert_eq!(
        compute_final_state(&messages, &ReplayConfig::default()),
        state(&[("b", "2")])
    );
    assert_eq!(rendered(&messages, 3), "b = 2");
}

#[test]
fn legacy_message_passes_through_and_keeps_state() {
    let messages = vec![wb(1, "SET a 1"), wb(2, "garbage not a diff at all")];
    assert!(!is_whiteboard_diff("garbage not a diff at all"));
    assert_eq!(rendered(&messages, 2), "garbage not a diff at all");
    assert_eq!(
        compute_final_state(&messages, &ReplayConfig::default()),
        state(&[("a", "1")])
    );
}

#[test]
fn unparseable_diff_repeats_previous_snapshot() {
    let broken = "[whiteboard:diff]\nnotacommand\n";
    let messages = vec![wb(1, "SET a 1"), wb(2, broken)];
    assert!(is_whiteboard_diff(broken));
    assert!(parse_whiteboard_diff(broken).is_empty());
    assert_eq!(rendered(&messages, 2), rendered(&messages, 1));
}

#[test]
fn clear_then_set_in_one_message() {
    let messages = vec![wb(1, "SET a 1\nSET b 2"), wb(2, "CLEAR\nSET x 9")];
    assert_eq!(
        compute_final_state(&messages, &ReplayConfig::default()),
        state(&[("x", "9")])
    );
    assert_eq!(rendered(&messages, 2), "x = 9");
}

#[test]
fn non_whiteboard_senders_are_excluded() {
    let messages = vec![
        Message::new(1, "alice", "SET a 1"),
        Message::new(2, "bob", "[whiteboard:diff]\nCLEAR"),
        Message::new(3, "carol", "hello everyone"),
        wb(4, "SET z 26"),
    ];
    let snapshots = compute_message_snapshots(&messages, &ReplayConfig::default());
    assert_eq!(snapshots.len(), 1);
    for id in 1..=3 {
        assert!(!snapshots.contains(&MessageId::from(id)));
    }
    assert_eq!(
        compute_final_state(&messages, &ReplayConfig::default()),
        state(&[("z", "26")])
    );
}

#[test]
fn interleaved_history_matches_manual_fold() {
    let messages = vec![
        wb(1, "```whiteboard\nSET title Sprint 12\nSET owner mina\n```"),
        Message::new(2, "mina", "thanks!"),
        wb(3, "Full board (old format):\ntitle = Sprint 11"),
        wb(4, "[whiteboard:diff]\nSET owner jun\n??? stray\nDELETE missing"),
        wb(5, "[whiteboard:diff]\n"),
        wb(6, "SET notes first\\nsecond"),
    ];
    let diffs = [1usize, 4, 5, 6];
    let mut expected = WhiteboardState::new();
    for idx in diffs {
        let content = messages[idx - 1].content.as_deref().unwrap_or_default();
        expected = apply_diff(&expected, &parse_whiteboard_diff(content));
    }

    let config = ReplayConfig::default();
    assert_eq!(compute_final_state(&messages, &config), expected);
    assert_eq!(
        render_whiteboard(&expected),
        "notes = first\n        second\nowner = jun\ntitle = Sprint 12"
    );
    assert_eq!(rendered(&messages, 5), rendered(&messages, 4));
    assert_eq!(rendered(&messages, 3), "Full board (old format):\ntitle = Sprint 11");
}

#[test]
fn empty_diff_on_empty_board_renders_placeholder() {
    let messages = vec![wb(1, "[whiteboard:diff]")];
    assert_eq!(rendered(&messages, 1), EMPTY_WHITEBOARD);
}

#[test]
fn noop_diff_renders_identically() {
    let base = state(&[("a", "1"), ("b", "2")]);
    let ops: Vec<Operation> = Vec::new();
    assert_eq!(render_whiteboard(&apply_diff(&base, &ops)), render_whiteboard(&base));
}
