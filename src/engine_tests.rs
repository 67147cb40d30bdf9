use super::*;

fn layout_for(state: &BufferState, width: usize) -> VisualLayout {
    layout::compute_layout(&state.lines, state.cursor, width)
}

fn apply_with_width(state: &BufferState, action: Action, width: usize) -> BufferState {
    let layout = layout_for(state, width);
    apply(state, action, &layout)
}

#[test]
fn new_buffer_places_cursor_at_clamped_offset() {
    let s = BufferState::new("hello\nworld", 100);
    assert_eq!(s.cursor, Position::new(1, 5));
    assert_eq!(s.text(), "hello\nworld");
}

#[test]
fn insert_operations_splice_and_advance_cursor() {
    let s = BufferState::new("ac", 1);
    let s2 = apply_with_width(
        &s,
        Action::ApplyOperations(vec![EditOp::Insert("b".to_string())]),
        80,
    );
    assert_eq!(s2.text(), "abc");
    assert_eq!(s2.cursor, Position::new(0, 2));
    assert_eq!(s2.history.undo_len(), 1);
}

#[test]
fn insert_with_embedded_del_byte_splits_into_backspace() {
    let s = BufferState::new("", 0);
    let s2 = apply_with_width(
        &s,
        Action::ApplyOperations(vec![EditOp::Insert("ab\u{7f}c".to_string())]),
        80,
    );
    // "a", "b", <backspace removes 'b'>, "c" => "ac"
    assert_eq!(s2.text(), "ac");
}

#[test]
fn insert_multiline_payload_splits_lines() {
    let s = BufferState::new("ac", 1);
    let s2 = apply_with_width(
        &s,
        Action::ApplyOperations(vec![EditOp::Insert("x\ny".to_string())]),
        80,
    );
    assert_eq!(s2.lines, vec!["ax".to_string(), "yc".to_string()]);
    assert_eq!(s2.cursor, Position::new(1, 1));
}

#[test]
fn backspace_at_origin_is_a_true_noop() {
    let s = BufferState::new("abc", 0);
    let s2 = apply_with_width(&s, Action::ApplyOperations(vec![EditOp::Backspace]), 80);
    assert_eq!(s2.text(), "abc");
    assert_eq!(s2.history.undo_len(), 0);
}

#[test]
fn backspace_merges_lines_at_column_zero() {
    let s = BufferState::new("foo\nbar", 4);
    let s2 = apply_with_width(&s, Action::ApplyOperations(vec![EditOp::Backspace]), 80);
    assert_eq!(s2.text(), "foobar");
    assert_eq!(s2.cursor, Position::new(0, 3));
}

#[test]
fn delete_at_end_of_buffer_is_noop() {
    let s = BufferState::new("abc", 3);
    let s2 = apply_with_width(&s, Action::Delete, 80);
    assert_eq!(s2.text(), "abc");
    assert_eq!(s2.history.undo_len(), 0);
}

#[test]
fn delete_joins_next_line() {
    let s = BufferState::new("foo\nbar", 3);
    let s2 = apply_with_width(&s, Action::Delete, 80);
    assert_eq!(s2.text(), "foobar");
    assert_eq!(s2.cursor, Position::new(0, 3));
}

#[test]
fn delete_word_left_skips_trailing_whitespace_then_a_word() {
    let s = BufferState::new("hello world  ", 13);
    let s2 = apply_with_width(&s, Action::DeleteWordLeft, 80);
    assert_eq!(s2.text(), "hello ");
}

#[test]
fn delete_word_left_on_all_whitespace_prefix_deletes_one_codepoint() {
    let s = BufferState::new("   ", 3);
    let s2 = apply_with_width(&s, Action::DeleteWordLeft, 80);
    assert_eq!(s2.text(), "  ");
}

#[test]
fn delete_word_left_at_column_zero_merges_lines() {
    let s = BufferState::new("foo\nbar", 4);
    let s2 = apply_with_width(&s, Action::DeleteWordLeft, 80);
    assert_eq!(s2.text(), "foobar");
}

#[test]
fn delete_word_right_skips_delimiter_then_word() {
    let s = BufferState::new("  hello world", 0);
    let s2 = apply_with_width(&s, Action::DeleteWordRight, 80);
    assert_eq!(s2.text(), " world");
}

#[test]
fn delete_word_right_at_end_of_non_last_line_joins() {
    let s = BufferState::new("foo\nbar", 3);
    let s2 = apply_with_width(&s, Action::DeleteWordRight, 80);
    assert_eq!(s2.text(), "foobar");
}

#[test]
fn kill_line_right_truncates_to_cursor() {
    let s = BufferState::new("hello world", 5);
    let s2 = apply_with_width(&s, Action::KillLineRight, 80);
    assert_eq!(s2.text(), "hello");
}

#[test]
fn kill_line_right_at_end_of_non_last_line_joins() {
    let s = BufferState::new("foo\nbar", 3);
    let s2 = apply_with_width(&s, Action::KillLineRight, 80);
    assert_eq!(s2.text(), "foobar");
}

#[test]
fn kill_line_left_truncates_from_start() {
    let s = BufferState::new("hello world", 6);
    let s2 = apply_with_width(&s, Action::KillLineLeft, 80);
    assert_eq!(s2.text(), "world");
    assert_eq!(s2.cursor, Position::new(0, 0));
}

#[test]
fn replace_range_rejects_inverted_range() {
    let s = BufferState::new("hello", 0);
    let s2 = apply_with_width(
        &s,
        Action::ReplaceRange {
            start: Position::new(0, 3),
            end: Position::new(0, 1),
            text: "x".to_string(),
        },
        80,
    );
    assert_eq!(s2.text(), "hello");
    assert_eq!(s2.history.undo_len(), 0);
}

#[test]
fn replace_range_rejects_out_of_bounds_column() {
    let s = BufferState::new("hi", 0);
    let s2 = apply_with_width(
        &s,
        Action::ReplaceRange {
            start: Position::new(0, 0),
            end: Position::new(0, 99),
            text: "x".to_string(),
        },
        80,
    );
    assert_eq!(s2.text(), "hi");
}

#[test]
fn replace_range_splices_across_lines() {
    let s = BufferState::new("foo\nbar\nbaz", 0);
    let s2 = apply_with_width(
        &s,
        Action::ReplaceRange {
            start: Position::new(0, 1),
            end: Position::new(2, 2),
            text: "X".to_string(),
        },
        80,
    );
    assert_eq!(s2.text(), "fXz");
    assert_eq!(s2.cursor, Position::new(0, 2));
}

#[test]
fn undo_restores_prior_state_exactly_after_one_mutation() {
    let s = BufferState::new("abc", 3);
    let s2 = apply_with_width(
        &s,
        Action::ApplyOperations(vec![EditOp::Insert("d".to_string())]),
        80,
    );
    let s3 = apply_with_width(&s2, Action::Undo, 80);
    assert_eq!(s3.text(), s.text());
    assert_eq!(s3.cursor, s.cursor);
}

#[test]
fn redo_replays_an_undone_mutation() {
    let s = BufferState::new("abc", 3);
    let s2 = apply_with_width(
        &s,
        Action::ApplyOperations(vec![EditOp::Insert("d".to_string())]),
        80,
    );
    let s3 = apply_with_width(&s2, Action::Undo, 80);
    let s4 = apply_with_width(&s3, Action::Redo, 80);
    assert_eq!(s4.text(), "abcd");
}

#[test]
fn redo_stack_clears_after_a_fresh_mutation() {
    let s = BufferState::new("abc", 3);
    let s2 = apply_with_width(
        &s,
        Action::ApplyOperations(vec![EditOp::Insert("d".to_string())]),
        80,
    );
    let s3 = apply_with_width(&s2, Action::Undo, 80);
    let s4 = apply_with_width(
        &s3,
        Action::ApplyOperations(vec![EditOp::Insert("e".to_string())]),
        80,
    );
    assert_eq!(s4.history.redo_len(), 0);
}

#[test]
fn undo_on_empty_history_is_noop() {
    let s = BufferState::new("abc", 0);
    let s2 = apply_with_width(&s, Action::Undo, 80);
    assert_eq!(s2.text(), "abc");
}

#[test]
fn copy_without_selection_is_noop() {
    let s = BufferState::new("abc", 1);
    let s2 = apply_with_width(&s, Action::Copy, 80);
    assert_eq!(s2.clipboard, None);
}

#[test]
fn start_selection_then_copy_captures_span() {
    let s = BufferState::new("hello world", 0);
    let s = apply_with_width(&s, Action::StartSelection, 80);
    let s = apply_with_width(&s, Action::MoveToOffset(5), 80);
    let s = apply_with_width(&s, Action::Copy, 80);
    assert_eq!(s.clipboard, Some("hello".to_string()));
    // Copy never clears the selection.
    assert!(s.selection_anchor.is_some());
}

#[test]
fn paste_inserts_clipboard_contents() {
    let s = BufferState::new("hello world", 0);
    let s = apply_with_width(&s, Action::StartSelection, 80);
    let s = apply_with_width(&s, Action::MoveToOffset(5), 80);
    let s = apply_with_width(&s, Action::Copy, 80);
    let s = apply_with_width(&s, Action::MoveToOffset(11), 80);
    let s = apply_with_width(&s, Action::Paste, 80);
    assert_eq!(s.text(), "hello worldhello");
}

#[test]
fn paste_with_empty_clipboard_is_noop() {
    let s = BufferState::new("abc", 1);
    let s2 = apply_with_width(&s, Action::Paste, 80);
    assert_eq!(s2.text(), "abc");
    assert_eq!(s2.history.undo_len(), 0);
}

#[test]
fn any_mutating_action_clears_the_selection_anchor() {
    let s = BufferState::new("abc", 1);
    let s = apply_with_width(&s, Action::StartSelection, 80);
    assert!(s.selection_anchor.is_some());
    let s = apply_with_width(
        &s,
        Action::ApplyOperations(vec![EditOp::Insert("x".to_string())]),
        80,
    );
    assert_eq!(s.selection_anchor, None);
}

#[test]
fn move_right_wraps_to_next_visual_row_at_a_soft_break() {
    let s = BufferState::new("hello world", 5);
    let s2 = apply_with_width(&s, Action::Move(MoveDir::Right), 10);
    assert_eq!(s2.cursor, Position::new(0, 6));
}

#[test]
fn move_left_at_buffer_start_is_a_noop() {
    let s = BufferState::new("abc", 0);
    let s2 = apply_with_width(&s, Action::Move(MoveDir::Left), 80);
    assert_eq!(s2.cursor, Position::new(0, 0));
}

#[test]
fn move_up_down_reuses_preferred_column() {
    let s = BufferState::new("hello\nhi\nworld", 4);
    let s = apply_with_width(&s, Action::Move(MoveDir::Down), 80);
    // Row 1 ("hi") is shorter than column 4; clamp, but remember preferred col.
    assert_eq!(s.cursor, Position::new(1, 2));
    let s = apply_with_width(&s, Action::Move(MoveDir::Down), 80);
    // Row 2 ("world") is long enough to restore the original column.
    assert_eq!(s.cursor, Position::new(2, 4));
}

#[test]
fn move_home_and_end_clear_preferred_col() {
    let s = BufferState::new("hello", 2);
    let s = apply_with_width(&s, Action::Move(MoveDir::End), 80);
    assert_eq!(s.cursor, Position::new(0, 5));
    assert_eq!(s.preferred_col, None);
    let s = apply_with_width(&s, Action::Move(MoveDir::Home), 80);
    assert_eq!(s.cursor, Position::new(0, 0));
}

#[test]
fn set_text_with_push_to_undo_false_skips_history() {
    let s = BufferState::new("abc", 0);
    let s2 = apply_with_width(
        &s,
        Action::SetText {
            text: "xyz".to_string(),
            push_to_undo: false,
        },
        80,
    );
    assert_eq!(s2.text(), "xyz");
    assert_eq!(s2.history.undo_len(), 0);
}

#[test]
fn move_to_offset_clamps_past_end() {
    let s = BufferState::new("abc", 0);
    let s2 = apply_with_width(&s, Action::MoveToOffset(999), 80);
    assert_eq!(s2.cursor, Position::new(0, 3));
}
